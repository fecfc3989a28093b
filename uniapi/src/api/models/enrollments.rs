use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::enrollments::Enrollment;
use crate::types::{CourseId, EnrollmentId, StudentId};

/// Request to enroll a student in a course.
///
/// Identifiers and the date arrive as text and are parsed after the presence check.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct EnrollmentCreate {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub student_id: Option<String>,
    #[schema(example = "123e4567-e89b-12d3-a456-426614174001")]
    pub course_id: Option<String>,
    /// Calendar date, `YYYY-MM-DD`
    #[schema(example = "2024-11-27")]
    pub enrollment_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: EnrollmentId,
    #[schema(value_type = String, format = "uuid")]
    pub student_id: StudentId,
    #[schema(value_type = String, format = "uuid")]
    pub course_id: CourseId,
    #[schema(value_type = String, format = "date")]
    pub enrollment_date: NaiveDate,
}

impl From<Enrollment> for EnrollmentResponse {
    fn from(enrollment: Enrollment) -> Self {
        Self {
            id: enrollment.id,
            student_id: enrollment.student_id,
            course_id: enrollment.course_id,
            enrollment_date: enrollment.enrollment_date,
        }
    }
}
