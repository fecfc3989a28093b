//! The data access seam used by the HTTP layer.
//!
//! Handlers never touch a pool directly; they hold an `Arc<dyn UniversityStore>` in
//! [`AppState`](crate::AppState). [`PgStore`] is the production implementation and checks a
//! connection out of the pool per operation. [`MemoryStore`](crate::db::memory::MemoryStore)
//! keeps the same semantics without a database.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    db::{
        errors::Result,
        handlers::{Courses, Enrollments, Students},
        models::{
            courses::{CourseCreateDBRequest, CourseDBResponse, CourseUpdateDBRequest},
            enrollments::{EnrollmentCreateDBRequest, EnrollmentDBResponse},
            students::{EnrolledStudent, StudentCreateDBRequest, StudentDBResponse},
        },
    },
    types::{CourseId, StudentId},
};

#[async_trait]
pub trait UniversityStore: Send + Sync {
    async fn create_student(&self, request: StudentCreateDBRequest) -> Result<StudentDBResponse>;

    async fn list_students(&self) -> Result<Vec<StudentDBResponse>>;

    /// Students with at least one enrollment, each listed once
    async fn list_enrolled_students(&self) -> Result<Vec<EnrolledStudent>>;

    /// Removes the student and, by cascade, their enrollments. `None` when nothing matched.
    async fn delete_student(&self, id: StudentId) -> Result<Option<StudentDBResponse>>;

    async fn create_course(&self, request: CourseCreateDBRequest) -> Result<CourseDBResponse>;

    /// All courses, or only those whose teacher equals `teacher` exactly
    async fn list_courses(&self, teacher: Option<&str>) -> Result<Vec<CourseDBResponse>>;

    /// Returns `false` when no course has the given identifier
    async fn update_course(&self, id: CourseId, request: CourseUpdateDBRequest) -> Result<bool>;

    /// Removes the course and, by cascade, its enrollments. `None` when nothing matched.
    async fn delete_course(&self, id: CourseId) -> Result<Option<CourseDBResponse>>;

    /// Fails with a foreign key violation when the student or course does not exist
    async fn create_enrollment(&self, request: EnrollmentCreateDBRequest) -> Result<EnrollmentDBResponse>;

    async fn list_enrollments(&self) -> Result<Vec<EnrollmentDBResponse>>;
}

/// Postgres-backed store
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UniversityStore for PgStore {
    async fn create_student(&self, request: StudentCreateDBRequest) -> Result<StudentDBResponse> {
        let mut conn = self.pool.acquire().await?;
        Students::new(&mut conn).create(&request).await
    }

    async fn list_students(&self) -> Result<Vec<StudentDBResponse>> {
        let mut conn = self.pool.acquire().await?;
        Students::new(&mut conn).list().await
    }

    async fn list_enrolled_students(&self) -> Result<Vec<EnrolledStudent>> {
        let mut conn = self.pool.acquire().await?;
        Students::new(&mut conn).list_enrolled().await
    }

    async fn delete_student(&self, id: StudentId) -> Result<Option<StudentDBResponse>> {
        let mut conn = self.pool.acquire().await?;
        Students::new(&mut conn).delete(id).await
    }

    async fn create_course(&self, request: CourseCreateDBRequest) -> Result<CourseDBResponse> {
        let mut conn = self.pool.acquire().await?;
        Courses::new(&mut conn).create(&request).await
    }

    async fn list_courses(&self, teacher: Option<&str>) -> Result<Vec<CourseDBResponse>> {
        let mut conn = self.pool.acquire().await?;
        Courses::new(&mut conn).list(teacher).await
    }

    async fn update_course(&self, id: CourseId, request: CourseUpdateDBRequest) -> Result<bool> {
        let mut conn = self.pool.acquire().await?;
        Courses::new(&mut conn).update(id, &request).await
    }

    async fn delete_course(&self, id: CourseId) -> Result<Option<CourseDBResponse>> {
        let mut conn = self.pool.acquire().await?;
        Courses::new(&mut conn).delete(id).await
    }

    async fn create_enrollment(&self, request: EnrollmentCreateDBRequest) -> Result<EnrollmentDBResponse> {
        let mut conn = self.pool.acquire().await?;
        Enrollments::new(&mut conn).create(&request).await
    }

    async fn list_enrollments(&self) -> Result<Vec<EnrollmentDBResponse>> {
        let mut conn = self.pool.acquire().await?;
        Enrollments::new(&mut conn).list().await
    }
}

#[cfg(all(test, feature = "postgres-tests"))]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[sqlx::test]
    async fn test_delete_student_cascades_to_enrollments(pool: PgPool) {
        let store = PgStore::new(pool);

        let student = store
            .create_student(StudentCreateDBRequest::new("John Doe".to_string(), 22, "CS".to_string()))
            .await
            .unwrap();
        let course = store
            .create_course(CourseCreateDBRequest::new(
                "Rust".to_string(),
                "Ferris".to_string(),
                "Tue 14:00".to_string(),
                10,
            ))
            .await
            .unwrap();
        store
            .create_enrollment(EnrollmentCreateDBRequest::new(
                student.id,
                course.id,
                NaiveDate::from_ymd_opt(2024, 11, 27).unwrap(),
            ))
            .await
            .unwrap();

        assert_eq!(store.list_enrolled_students().await.unwrap().len(), 1);
        assert!(store.delete_student(student.id).await.unwrap().is_some());
        assert!(store.list_enrollments().await.unwrap().is_empty());
        assert!(store.list_enrolled_students().await.unwrap().is_empty());
    }
}
