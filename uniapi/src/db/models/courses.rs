//! Database models for courses.

use crate::types::CourseId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Database representation of a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Course {
    pub id: CourseId,
    pub course_name: String,
    pub teacher: String,
    /// Free-form schedule, e.g. "Mon, Wed, Fri - 10:00 AM to 12:00 PM"
    pub course_table: String,
    pub max_students: i32,
}

/// Request to insert a new course
#[derive(Debug, Clone)]
pub struct CourseCreateDBRequest {
    pub id: CourseId,
    pub course_name: String,
    pub teacher: String,
    pub course_table: String,
    pub max_students: i32,
}

impl CourseCreateDBRequest {
    pub fn new(course_name: String, teacher: String, course_table: String, max_students: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            course_name,
            teacher,
            course_table,
            max_students,
        }
    }
}

/// Full replacement of a course's mutable fields
#[derive(Debug, Clone)]
pub struct CourseUpdateDBRequest {
    pub course_name: String,
    pub teacher: String,
    pub course_table: String,
    pub max_students: i32,
}

/// Response from database after creating or deleting a course
pub type CourseDBResponse = Course;
