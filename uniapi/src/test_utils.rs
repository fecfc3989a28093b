//! Helpers shared by the HTTP-level tests.

use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::NaiveDate;

use crate::{
    Application,
    config::{Config, DatabaseConfig},
    db::{
        errors::{DbError, Result},
        memory::MemoryStore,
        models::{
            courses::{Course, CourseCreateDBRequest, CourseDBResponse, CourseUpdateDBRequest},
            enrollments::{Enrollment, EnrollmentCreateDBRequest, EnrollmentDBResponse},
            students::{EnrolledStudent, Student, StudentCreateDBRequest, StudentDBResponse},
        },
    },
    types::{CourseId, StudentId},
};

pub use crate::db::store::UniversityStore;

pub fn create_test_config() -> Config {
    Config {
        database: DatabaseConfig::Memory,
        ..Default::default()
    }
}

/// Test server over a fresh [`MemoryStore`], plus a handle on that store for seeding and checks
pub fn create_test_app() -> (TestServer, MemoryStore) {
    let store = MemoryStore::new();
    let app = Application::new_with_store(create_test_config(), Arc::new(store.clone())).expect("Failed to create application");
    (app.into_test_server(), store)
}

/// Test server whose store fails every call, as an unreachable database would
pub fn create_failing_test_app() -> TestServer {
    Application::new_with_store(create_test_config(), Arc::new(FailingStore))
        .expect("Failed to create application")
        .into_test_server()
}

pub async fn seed_student(store: &MemoryStore, name: &str) -> Student {
    store
        .create_student(StudentCreateDBRequest::new(name.to_string(), 20, "Mathematics".to_string()))
        .await
        .expect("Failed to seed student")
}

pub async fn seed_course(store: &MemoryStore, course_name: &str, teacher: &str) -> Course {
    store
        .create_course(CourseCreateDBRequest::new(
            course_name.to_string(),
            teacher.to_string(),
            "Mon, Wed, Fri - 10:00 AM to 12:00 PM".to_string(),
            30,
        ))
        .await
        .expect("Failed to seed course")
}

pub async fn seed_enrollment(store: &MemoryStore, student_id: StudentId, course_id: CourseId) -> Enrollment {
    let date = NaiveDate::from_ymd_opt(2024, 11, 27).expect("valid date");
    store
        .create_enrollment(EnrollmentCreateDBRequest::new(student_id, course_id, date))
        .await
        .expect("Failed to seed enrollment")
}

pub struct FailingStore;

fn unavailable() -> DbError {
    DbError::Other(anyhow::anyhow!("connection refused (os error 111)"))
}

#[async_trait]
impl UniversityStore for FailingStore {
    async fn create_student(&self, _request: StudentCreateDBRequest) -> Result<StudentDBResponse> {
        Err(unavailable())
    }

    async fn list_students(&self) -> Result<Vec<StudentDBResponse>> {
        Err(unavailable())
    }

    async fn list_enrolled_students(&self) -> Result<Vec<EnrolledStudent>> {
        Err(unavailable())
    }

    async fn delete_student(&self, _id: StudentId) -> Result<Option<StudentDBResponse>> {
        Err(unavailable())
    }

    async fn create_course(&self, _request: CourseCreateDBRequest) -> Result<CourseDBResponse> {
        Err(unavailable())
    }

    async fn list_courses(&self, _teacher: Option<&str>) -> Result<Vec<CourseDBResponse>> {
        Err(unavailable())
    }

    async fn update_course(&self, _id: CourseId, _request: CourseUpdateDBRequest) -> Result<bool> {
        Err(unavailable())
    }

    async fn delete_course(&self, _id: CourseId) -> Result<Option<CourseDBResponse>> {
        Err(unavailable())
    }

    async fn create_enrollment(&self, _request: EnrollmentCreateDBRequest) -> Result<EnrollmentDBResponse> {
        Err(unavailable())
    }

    async fn list_enrollments(&self) -> Result<Vec<EnrollmentDBResponse>> {
        Err(unavailable())
    }
}
