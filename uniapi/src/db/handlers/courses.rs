//! Database repository for courses.

use crate::{
    db::{
        errors::Result,
        models::courses::{Course, CourseCreateDBRequest, CourseDBResponse, CourseUpdateDBRequest},
    },
    types::{CourseId, abbrev_uuid},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Courses<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Courses<'c> {
    /// Create a new Courses repository instance
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Insert a course and return the stored row
    #[instrument(skip(self, request), fields(course_id = %abbrev_uuid(&request.id), teacher = %request.teacher), err)]
    pub async fn create(&mut self, request: &CourseCreateDBRequest) -> Result<CourseDBResponse> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO courses (id, course_name, teacher, course_table, max_students)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, course_name, teacher, course_table, max_students
            "#,
        )
        .bind(request.id)
        .bind(&request.course_name)
        .bind(&request.teacher)
        .bind(&request.course_table)
        .bind(request.max_students)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(course)
    }

    /// List courses, optionally only those taught by `teacher` (exact, case-sensitive match).
    ///
    /// A single statement serves both cases: a NULL parameter disables the predicate.
    #[instrument(skip(self), err)]
    pub async fn list(&mut self, teacher: Option<&str>) -> Result<Vec<CourseDBResponse>> {
        let courses = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, course_name, teacher, course_table, max_students
            FROM courses
            WHERE ($1::text IS NULL OR teacher = $1)
            "#,
        )
        .bind(teacher)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(courses)
    }

    /// Overwrite all mutable fields of a course. Returns whether a row matched.
    #[instrument(skip(self, request), fields(course_id = %abbrev_uuid(&id)), err)]
    pub async fn update(&mut self, id: CourseId, request: &CourseUpdateDBRequest) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE courses
            SET course_name = $1, teacher = $2, course_table = $3, max_students = $4
            WHERE id = $5
            "#,
        )
        .bind(&request.course_name)
        .bind(&request.teacher)
        .bind(&request.course_table)
        .bind(request.max_students)
        .bind(id)
        .execute(&mut *self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a course, returning the removed row if one matched
    #[instrument(skip(self), fields(course_id = %abbrev_uuid(&id)), err)]
    pub async fn delete(&mut self, id: CourseId) -> Result<Option<CourseDBResponse>> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            DELETE FROM courses
            WHERE id = $1
            RETURNING id, course_name, teacher, course_table, max_students
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(course)
    }
}
