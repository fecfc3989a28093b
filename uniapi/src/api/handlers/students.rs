use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use tracing::instrument;

use crate::{
    AppState,
    api::{
        models::{
            responses::{DataResponse, ErrorResponse, StatusResponse},
            students::{DeleteStudentQuery, EnrolledStudentResponse, StudentCreate, StudentResponse},
        },
        validation::{body_or_default, present, present_id, query_or_reject},
    },
    db::models::students::StudentCreateDBRequest,
    errors::{Error, Result},
    types::parse_id,
};

const CREATE_FIELDS_REQUIRED: &str = "Send please name, age, main_way!";
const DELETE_ID_REQUIRED: &str = "Send please student_id!";

fn id_required() -> Error {
    Error::BadRequest {
        message: DELETE_ID_REQUIRED.to_string(),
    }
}

/// Create a student
#[utoipa::path(
    post,
    path = "/api/v1/create/student",
    tag = "Students Service",
    summary = "Create a new student",
    request_body = StudentCreate,
    responses(
        (status = 201, description = "Student created", body = DataResponse<StudentResponse>),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[instrument(skip_all)]
pub async fn create_student(
    State(state): State<AppState>,
    body: std::result::Result<Json<StudentCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<DataResponse<StudentResponse>>)> {
    let StudentCreate { name, age, main_way } = body_or_default(body);

    let (Some(name), Some(age), Some(main_way)) = (present(name), present(age), present(main_way)) else {
        return Err(Error::BadRequest {
            message: CREATE_FIELDS_REQUIRED.to_string(),
        });
    };

    let student = state
        .store
        .create_student(StudentCreateDBRequest::new(name, age, main_way))
        .await?;

    Ok((StatusCode::CREATED, Json(DataResponse::new(student.into()))))
}

/// List all students
#[utoipa::path(
    get,
    path = "/api/v1/get/students",
    tag = "Students Service",
    summary = "Get all students",
    responses(
        (status = 200, description = "All students", body = DataResponse<Vec<StudentResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[instrument(skip_all)]
pub async fn list_students(State(state): State<AppState>) -> Result<Json<DataResponse<Vec<StudentResponse>>>> {
    let students = state.store.list_students().await?;
    Ok(Json(DataResponse::new(students.into_iter().map(Into::into).collect())))
}

/// List students that have at least one enrollment
#[utoipa::path(
    get,
    path = "/api/v1/get-enrollment-students",
    tag = "Students Service",
    summary = "Get students with enrollments",
    description = "Identifier and name of every student enrolled in at least one course. Each student appears once.",
    responses(
        (status = 200, description = "Enrolled students", body = DataResponse<Vec<EnrolledStudentResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[instrument(skip_all)]
pub async fn list_enrolled_students(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<EnrolledStudentResponse>>>> {
    let students = state.store.list_enrolled_students().await?;
    Ok(Json(DataResponse::new(students.into_iter().map(Into::into).collect())))
}

/// Delete a student by identifier
#[utoipa::path(
    delete,
    path = "/api/v1/delete/student",
    tag = "Students Service",
    summary = "Delete a student",
    description = "Deletes the student and their enrollments.",
    params(DeleteStudentQuery),
    responses(
        (status = 200, description = "Student deleted", body = StatusResponse),
        (status = 400, description = "Missing or repeated student_id", body = ErrorResponse),
        (status = 404, description = "Student not found", body = StatusResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[instrument(skip_all)]
pub async fn delete_student(
    State(state): State<AppState>,
    query: std::result::Result<Query<DeleteStudentQuery>, QueryRejection>,
) -> Result<Json<StatusResponse>> {
    let query = query_or_reject(query, id_required)?;
    let raw_id = present_id(query.student_id).ok_or_else(id_required)?;

    let deleted = match parse_id(&raw_id) {
        Some(id) => state.store.delete_student(id).await?,
        None => None,
    };

    match deleted {
        Some(_) => Ok(Json(StatusResponse::success(format!("User with ID {raw_id} has been deleted")))),
        None => Err(Error::NotFound {
            resource: "User".to_string(),
            id: raw_id,
        }),
    }
}
