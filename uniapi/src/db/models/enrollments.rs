//! Database models for enrollments.

use crate::types::{CourseId, EnrollmentId, StudentId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Database representation of an enrollment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub enrollment_date: NaiveDate,
}

/// Request to insert a new enrollment.
///
/// The referenced student and course are not looked up first; the schema's foreign keys reject
/// dangling references.
#[derive(Debug, Clone)]
pub struct EnrollmentCreateDBRequest {
    pub id: EnrollmentId,
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub enrollment_date: NaiveDate,
}

impl EnrollmentCreateDBRequest {
    pub fn new(student_id: StudentId, course_id: CourseId, enrollment_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            student_id,
            course_id,
            enrollment_date,
        }
    }
}

pub type EnrollmentDBResponse = Enrollment;
