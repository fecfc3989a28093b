//! Database repository for students.

use crate::{
    db::{
        errors::Result,
        models::students::{EnrolledStudent, Student, StudentCreateDBRequest, StudentDBResponse},
    },
    types::{StudentId, abbrev_uuid},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Students<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Students<'c> {
    /// Create a new Students repository instance
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Insert a student and return the stored row
    #[instrument(skip(self, request), fields(student_id = %abbrev_uuid(&request.id)), err)]
    pub async fn create(&mut self, request: &StudentCreateDBRequest) -> Result<StudentDBResponse> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (id, name, age, main_way)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, age, main_way
            "#,
        )
        .bind(request.id)
        .bind(&request.name)
        .bind(request.age)
        .bind(&request.main_way)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(student)
    }

    /// List every student
    #[instrument(skip(self), err)]
    pub async fn list(&mut self) -> Result<Vec<StudentDBResponse>> {
        let students = sqlx::query_as::<_, Student>("SELECT id, name, age, main_way FROM students")
            .fetch_all(&mut *self.db)
            .await?;

        Ok(students)
    }

    /// Students referenced by at least one enrollment.
    ///
    /// Written as a semi-join (`IN (subquery)`) so a student enrolled in several courses is
    /// returned once.
    #[instrument(skip(self), err)]
    pub async fn list_enrolled(&mut self) -> Result<Vec<EnrolledStudent>> {
        let students = sqlx::query_as::<_, EnrolledStudent>(
            r#"
            SELECT students.id, students.name
            FROM students
            WHERE students.id IN (SELECT student_id FROM enrollments)
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(students)
    }

    /// Delete a student, returning the removed row if one matched
    #[instrument(skip(self), fields(student_id = %abbrev_uuid(&id)), err)]
    pub async fn delete(&mut self, id: StudentId) -> Result<Option<StudentDBResponse>> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            DELETE FROM students
            WHERE id = $1
            RETURNING id, name, age, main_way
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(student)
    }
}
