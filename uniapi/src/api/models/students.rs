//! API request and response models for student endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::db::models::students::{EnrolledStudent, Student};
use crate::types::StudentId;

/// Request to create a student. All fields are required.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct StudentCreate {
    #[schema(example = "John Doe")]
    pub name: Option<String>,
    #[schema(example = 22)]
    pub age: Option<i32>,
    /// Main field of study
    #[schema(example = "Computer Science")]
    pub main_way: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StudentResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: StudentId,
    pub name: String,
    pub age: i32,
    pub main_way: String,
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            name: student.name,
            age: student.age,
            main_way: student.main_way,
        }
    }
}

/// A student with at least one enrollment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EnrolledStudentResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: StudentId,
    pub name: String,
}

impl From<EnrolledStudent> for EnrolledStudentResponse {
    fn from(student: EnrolledStudent) -> Self {
        Self {
            id: student.id,
            name: student.name,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteStudentQuery {
    /// Identifier of the student to delete
    pub student_id: Option<String>,
}
