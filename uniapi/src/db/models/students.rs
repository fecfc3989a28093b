//! Database models for students.

use crate::types::StudentId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Database representation of a student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub age: i32,
    pub main_way: String,
}

/// Request to insert a new student. The identifier is minted here, never taken from the caller.
#[derive(Debug, Clone)]
pub struct StudentCreateDBRequest {
    pub id: StudentId,
    pub name: String,
    pub age: i32,
    pub main_way: String,
}

impl StudentCreateDBRequest {
    pub fn new(name: String, age: i32, main_way: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            age,
            main_way,
        }
    }
}

/// Identifier and name of a student with at least one enrollment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct EnrolledStudent {
    pub id: StudentId,
    pub name: String,
}

/// Response from database after creating or deleting a student
pub type StudentDBResponse = Student;
