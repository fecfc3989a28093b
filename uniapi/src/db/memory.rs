//! In-process store for local runs and tests.
//!
//! Selected with `database: { type: memory }`. Rows live in insertion order inside a single
//! lock, and the schema's referential rules are reproduced: an enrollment must reference an
//! existing student and course, and deleting either side removes its enrollments.

use std::{collections::HashSet, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    db::{
        errors::{DbError, Result},
        models::{
            courses::{Course, CourseCreateDBRequest, CourseDBResponse, CourseUpdateDBRequest},
            enrollments::{Enrollment, EnrollmentCreateDBRequest, EnrollmentDBResponse},
            students::{EnrolledStudent, Student, StudentCreateDBRequest, StudentDBResponse},
        },
        store::UniversityStore,
    },
    types::{CourseId, StudentId},
};

#[derive(Debug, Default)]
struct Tables {
    students: Vec<Student>,
    courses: Vec<Course>,
    enrollments: Vec<Enrollment>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn foreign_key_violation(constraint: &str) -> DbError {
    DbError::ForeignKeyViolation {
        constraint: Some(constraint.to_string()),
        table: Some("enrollments".to_string()),
        message: format!("insert or update on table \"enrollments\" violates foreign key constraint \"{constraint}\""),
    }
}

#[async_trait]
impl UniversityStore for MemoryStore {
    async fn create_student(&self, request: StudentCreateDBRequest) -> Result<StudentDBResponse> {
        let student = Student {
            id: request.id,
            name: request.name,
            age: request.age,
            main_way: request.main_way,
        };
        self.tables.write().await.students.push(student.clone());
        Ok(student)
    }

    async fn list_students(&self) -> Result<Vec<StudentDBResponse>> {
        Ok(self.tables.read().await.students.clone())
    }

    async fn list_enrolled_students(&self) -> Result<Vec<EnrolledStudent>> {
        let tables = self.tables.read().await;
        let enrolled: HashSet<StudentId> = tables.enrollments.iter().map(|e| e.student_id).collect();

        Ok(tables
            .students
            .iter()
            .filter(|s| enrolled.contains(&s.id))
            .map(|s| EnrolledStudent {
                id: s.id,
                name: s.name.clone(),
            })
            .collect())
    }

    async fn delete_student(&self, id: StudentId) -> Result<Option<StudentDBResponse>> {
        let mut tables = self.tables.write().await;
        let Some(index) = tables.students.iter().position(|s| s.id == id) else {
            return Ok(None);
        };
        let student = tables.students.remove(index);
        tables.enrollments.retain(|e| e.student_id != id);
        Ok(Some(student))
    }

    async fn create_course(&self, request: CourseCreateDBRequest) -> Result<CourseDBResponse> {
        let course = Course {
            id: request.id,
            course_name: request.course_name,
            teacher: request.teacher,
            course_table: request.course_table,
            max_students: request.max_students,
        };
        self.tables.write().await.courses.push(course.clone());
        Ok(course)
    }

    async fn list_courses(&self, teacher: Option<&str>) -> Result<Vec<CourseDBResponse>> {
        let tables = self.tables.read().await;
        Ok(tables
            .courses
            .iter()
            .filter(|c| teacher.is_none_or(|t| c.teacher == t))
            .cloned()
            .collect())
    }

    async fn update_course(&self, id: CourseId, request: CourseUpdateDBRequest) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let Some(course) = tables.courses.iter_mut().find(|c| c.id == id) else {
            return Ok(false);
        };
        course.course_name = request.course_name;
        course.teacher = request.teacher;
        course.course_table = request.course_table;
        course.max_students = request.max_students;
        Ok(true)
    }

    async fn delete_course(&self, id: CourseId) -> Result<Option<CourseDBResponse>> {
        let mut tables = self.tables.write().await;
        let Some(index) = tables.courses.iter().position(|c| c.id == id) else {
            return Ok(None);
        };
        let course = tables.courses.remove(index);
        tables.enrollments.retain(|e| e.course_id != id);
        Ok(Some(course))
    }

    async fn create_enrollment(&self, request: EnrollmentCreateDBRequest) -> Result<EnrollmentDBResponse> {
        let mut tables = self.tables.write().await;
        if !tables.students.iter().any(|s| s.id == request.student_id) {
            return Err(foreign_key_violation("enrollments_student_id_fkey"));
        }
        if !tables.courses.iter().any(|c| c.id == request.course_id) {
            return Err(foreign_key_violation("enrollments_course_id_fkey"));
        }

        let enrollment = Enrollment {
            id: request.id,
            student_id: request.student_id,
            course_id: request.course_id,
            enrollment_date: request.enrollment_date,
        };
        tables.enrollments.push(enrollment.clone());
        Ok(enrollment)
    }

    async fn list_enrollments(&self) -> Result<Vec<EnrollmentDBResponse>> {
        Ok(self.tables.read().await.enrollments.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 27).unwrap()
    }

    async fn seed(store: &MemoryStore) -> (Student, Course) {
        let student = store
            .create_student(StudentCreateDBRequest::new("John Doe".to_string(), 22, "CS".to_string()))
            .await
            .unwrap();
        let course = store
            .create_course(CourseCreateDBRequest::new(
                "Advanced JavaScript".to_string(),
                "Dr. Jane Smith".to_string(),
                "Mon, Wed, Fri - 10:00 AM to 12:00 PM".to_string(),
                50,
            ))
            .await
            .unwrap();
        (student, course)
    }

    #[tokio::test]
    async fn test_enrollment_requires_existing_rows() {
        let store = MemoryStore::new();
        let (student, course) = seed(&store).await;

        let err = store
            .create_enrollment(EnrollmentCreateDBRequest::new(Uuid::new_v4(), course.id, date()))
            .await
            .unwrap_err();
        assert!(
            matches!(err, DbError::ForeignKeyViolation { constraint: Some(ref c), .. } if c == "enrollments_student_id_fkey")
        );

        let err = store
            .create_enrollment(EnrollmentCreateDBRequest::new(student.id, Uuid::new_v4(), date()))
            .await
            .unwrap_err();
        assert!(
            matches!(err, DbError::ForeignKeyViolation { constraint: Some(ref c), .. } if c == "enrollments_course_id_fkey")
        );

        assert!(store.list_enrollments().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deletes_cascade_to_enrollments() {
        let store = MemoryStore::new();
        let (student, course) = seed(&store).await;
        let (other_student, _) = seed(&store).await;

        store
            .create_enrollment(EnrollmentCreateDBRequest::new(student.id, course.id, date()))
            .await
            .unwrap();
        store
            .create_enrollment(EnrollmentCreateDBRequest::new(other_student.id, course.id, date()))
            .await
            .unwrap();

        assert_eq!(store.delete_student(student.id).await.unwrap(), Some(student.clone()));
        assert_eq!(store.list_enrollments().await.unwrap().len(), 1);
        assert_eq!(store.delete_student(student.id).await.unwrap(), None);

        assert_eq!(store.delete_course(course.id).await.unwrap(), Some(course));
        assert!(store.list_enrollments().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_enrolled_students_listed_once() {
        let store = MemoryStore::new();
        let (student, course) = seed(&store).await;
        let (_, second_course) = seed(&store).await;

        for course_id in [course.id, second_course.id] {
            store
                .create_enrollment(EnrollmentCreateDBRequest::new(student.id, course_id, date()))
                .await
                .unwrap();
        }

        assert_eq!(
            store.list_enrolled_students().await.unwrap(),
            vec![EnrolledStudent {
                id: student.id,
                name: student.name
            }]
        );
    }

    #[tokio::test]
    async fn test_teacher_filter_and_update() {
        let store = MemoryStore::new();
        let (_, course) = seed(&store).await;

        assert_eq!(store.list_courses(Some("Dr. Jane Smith")).await.unwrap().len(), 1);
        assert!(store.list_courses(Some("dr. jane smith")).await.unwrap().is_empty());

        let update = CourseUpdateDBRequest {
            course_name: "Rust".to_string(),
            teacher: "Ferris".to_string(),
            course_table: "Fri".to_string(),
            max_students: 5,
        };
        assert!(store.update_course(course.id, update.clone()).await.unwrap());
        assert!(!store.update_course(Uuid::new_v4(), update).await.unwrap());

        let courses = store.list_courses(Some("Ferris")).await.unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].course_name, "Rust");
        assert_eq!(courses[0].max_students, 5);
    }
}
