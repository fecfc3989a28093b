//! OpenAPI document for the `/api/v1` surface.
//!
//! Served as JSON at `{docs.path}/openapi.json` and rendered with Scalar at `{docs.path}`.

use utoipa::OpenApi;

use crate::api;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "University courses api",
        version = "1.0.0",
        description = "Manage students, courses and the enrollments that link them."
    ),
    paths(
        api::handlers::students::create_student,
        api::handlers::students::list_students,
        api::handlers::students::list_enrolled_students,
        api::handlers::students::delete_student,
        api::handlers::courses::create_course,
        api::handlers::courses::list_courses,
        api::handlers::courses::update_course,
        api::handlers::courses::delete_course,
        api::handlers::enrollments::create_enrollment,
        api::handlers::enrollments::list_enrollments,
    ),
    tags(
        (name = "Students Service", description = "Create, list and delete students"),
        (name = "Courses Service", description = "Create, query, update and delete courses"),
        (name = "Enrollments Service", description = "Enroll students in courses"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_operation() {
        let doc = ApiDoc::openapi();
        assert_eq!(doc.info.title, "University courses api");

        let expected = [
            "/api/v1/create/student",
            "/api/v1/get/students",
            "/api/v1/get-enrollment-students",
            "/api/v1/delete/student",
            "/api/v1/create/course",
            "/api/v1/get/course",
            "/api/v1/update/course",
            "/api/v1/delete/course",
            "/api/v1/create/enrollment",
            "/api/v1/get-all/enrollments",
        ];
        for path in expected {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        assert_eq!(doc.paths.paths.len(), expected.len());
    }
}
