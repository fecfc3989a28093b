//! Database repository for enrollments.

use crate::{
    db::{
        errors::Result,
        models::enrollments::{Enrollment, EnrollmentCreateDBRequest, EnrollmentDBResponse},
    },
    types::abbrev_uuid,
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Enrollments<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Enrollments<'c> {
    /// Create a new Enrollments repository instance
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Insert an enrollment. Unknown student or course identifiers surface as
    /// [`DbError::ForeignKeyViolation`](crate::db::errors::DbError::ForeignKeyViolation).
    #[instrument(
        skip(self, request),
        fields(
            student_id = %abbrev_uuid(&request.student_id),
            course_id = %abbrev_uuid(&request.course_id)
        ),
        err
    )]
    pub async fn create(&mut self, request: &EnrollmentCreateDBRequest) -> Result<EnrollmentDBResponse> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            INSERT INTO enrollments (id, student_id, course_id, enrollment_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, student_id, course_id, enrollment_date
            "#,
        )
        .bind(request.id)
        .bind(request.student_id)
        .bind(request.course_id)
        .bind(request.enrollment_date)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(enrollment)
    }

    #[instrument(skip(self), err)]
    pub async fn list(&mut self) -> Result<Vec<EnrollmentDBResponse>> {
        let enrollments = sqlx::query_as::<_, Enrollment>("SELECT id, student_id, course_id, enrollment_date FROM enrollments")
            .fetch_all(&mut *self.db)
            .await?;

        Ok(enrollments)
    }
}

#[cfg(all(test, feature = "postgres-tests"))]
mod tests {
    use super::*;
    use crate::db::errors::DbError;
    use crate::db::handlers::{Courses, Students};
    use crate::db::models::{courses::CourseCreateDBRequest, students::StudentCreateDBRequest};
    use chrono::NaiveDate;
    use sqlx::PgPool;
    use uuid::Uuid;

    #[sqlx::test]
    async fn test_create_and_list_enrollments(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let student = Students::new(&mut conn)
            .create(&StudentCreateDBRequest::new("John Doe".to_string(), 22, "CS".to_string()))
            .await
            .unwrap();
        let course = Courses::new(&mut conn)
            .create(&CourseCreateDBRequest::new(
                "Rust".to_string(),
                "Ferris".to_string(),
                "Tue 14:00".to_string(),
                10,
            ))
            .await
            .unwrap();

        let date = NaiveDate::from_ymd_opt(2024, 11, 27).unwrap();
        let mut repo = Enrollments::new(&mut conn);
        let created = repo
            .create(&EnrollmentCreateDBRequest::new(student.id, course.id, date))
            .await
            .unwrap();

        assert_eq!(created.enrollment_date, date);
        assert_eq!(repo.list().await.unwrap(), vec![created]);
    }

    #[sqlx::test]
    async fn test_dangling_reference_is_foreign_key_violation(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Enrollments::new(&mut conn);

        let date = NaiveDate::from_ymd_opt(2024, 11, 27).unwrap();
        let err = repo
            .create(&EnrollmentCreateDBRequest::new(Uuid::new_v4(), Uuid::new_v4(), date))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert!(repo.list().await.unwrap().is_empty());
    }
}
