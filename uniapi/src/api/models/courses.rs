//! API request and response models for course endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::db::models::courses::Course;
use crate::types::CourseId;

/// Body of a course create or update. All fields are required.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CourseFields {
    #[schema(example = "Advanced JavaScript")]
    pub course_name: Option<String>,
    #[schema(example = "Dr. Jane Smith")]
    pub teacher: Option<String>,
    /// Schedule or timetable of the course
    #[schema(example = "Mon, Wed, Fri - 10:00 AM to 12:00 PM")]
    pub course_table: Option<String>,
    #[schema(example = 50)]
    pub max_students: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CourseResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: CourseId,
    pub course_name: String,
    pub teacher: String,
    pub course_table: String,
    pub max_students: i32,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            course_name: course.course_name,
            teacher: course.teacher,
            course_table: course.course_table,
            max_students: course.max_students,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseListQuery {
    /// Only return courses taught by this teacher (exact match)
    pub teacher_name: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseIdQuery {
    /// Identifier of the course
    pub course_id: Option<String>,
}
