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
            courses::{CourseFields, CourseIdQuery, CourseListQuery, CourseResponse},
            responses::{DataResponse, ErrorResponse, MessageResponse, SimpleErrorResponse, StatusResponse},
        },
        validation::{body_or_default, present, present_id, query_or_reject},
    },
    db::models::courses::{CourseCreateDBRequest, CourseUpdateDBRequest},
    errors::{Error, Result},
    types::parse_id,
};

const CREATE_FIELDS_REQUIRED: &str = "Send please course_name, teacher, course_table, max_students!";
const UPDATE_FIELDS_REQUIRED: &str =
    "required fields course_id on params, course_name on body, teacher on body, course_table on body, max_students on body";

fn update_fields_required() -> Error {
    Error::Rejected {
        status: StatusCode::BAD_REQUEST,
        message: UPDATE_FIELDS_REQUIRED.to_string(),
    }
}

fn delete_id_required() -> Error {
    Error::BadRequest {
        message: "Send please course_id!".to_string(),
    }
}

fn course_not_found() -> Error {
    Error::Rejected {
        status: StatusCode::NOT_FOUND,
        message: "Course not found".to_string(),
    }
}

/// Create a course
#[utoipa::path(
    post,
    path = "/api/v1/create/course",
    tag = "Courses Service",
    summary = "Create a new course",
    request_body = CourseFields,
    responses(
        (status = 201, description = "Course created", body = DataResponse<CourseResponse>),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[instrument(skip_all)]
pub async fn create_course(
    State(state): State<AppState>,
    body: std::result::Result<Json<CourseFields>, JsonRejection>,
) -> Result<(StatusCode, Json<DataResponse<CourseResponse>>)> {
    let CourseFields {
        course_name,
        teacher,
        course_table,
        max_students,
    } = body_or_default(body);

    let (Some(course_name), Some(teacher), Some(course_table), Some(max_students)) =
        (present(course_name), present(teacher), present(course_table), present(max_students))
    else {
        return Err(Error::BadRequest {
            message: CREATE_FIELDS_REQUIRED.to_string(),
        });
    };

    let course = state
        .store
        .create_course(CourseCreateDBRequest::new(course_name, teacher, course_table, max_students))
        .await?;

    Ok((StatusCode::CREATED, Json(DataResponse::new(course.into()))))
}

/// List courses, optionally filtered by teacher
#[utoipa::path(
    get,
    path = "/api/v1/get/course",
    tag = "Courses Service",
    summary = "Get courses by teacher name",
    description = "Returns every course, or only those whose teacher matches `teacher_name` exactly (case-sensitive). An empty `teacher_name` is ignored.",
    params(CourseListQuery),
    responses(
        (status = 200, description = "Matching courses", body = DataResponse<Vec<CourseResponse>>),
        (status = 400, description = "teacher_name given more than once", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[instrument(skip_all)]
pub async fn list_courses(
    State(state): State<AppState>,
    query: std::result::Result<Query<CourseListQuery>, QueryRejection>,
) -> Result<Json<DataResponse<Vec<CourseResponse>>>> {
    let query = query_or_reject(query, || Error::BadRequest {
        message: "Send please at most one teacher_name!".to_string(),
    })?;
    let teacher = present(query.teacher_name);
    let courses = state.store.list_courses(teacher.as_deref()).await?;
    Ok(Json(DataResponse::new(courses.into_iter().map(Into::into).collect())))
}

/// Replace all fields of a course
#[utoipa::path(
    put,
    path = "/api/v1/update/course",
    tag = "Courses Service",
    summary = "Update course details",
    params(CourseIdQuery),
    request_body = CourseFields,
    responses(
        (status = 200, description = "Course updated", body = MessageResponse),
        (status = 400, description = "Missing required fields", body = SimpleErrorResponse),
        (status = 404, description = "Course not found", body = SimpleErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[instrument(skip_all)]
pub async fn update_course(
    State(state): State<AppState>,
    query: std::result::Result<Query<CourseIdQuery>, QueryRejection>,
    body: std::result::Result<Json<CourseFields>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let query = query_or_reject(query, update_fields_required)?;
    let CourseFields {
        course_name,
        teacher,
        course_table,
        max_students,
    } = body_or_default(body);

    let (Some(raw_id), Some(course_name), Some(teacher), Some(course_table), Some(max_students)) = (
        present_id(query.course_id),
        present(course_name),
        present(teacher),
        present(course_table),
        present(max_students),
    ) else {
        return Err(update_fields_required());
    };

    let id = parse_id(&raw_id).ok_or_else(course_not_found)?;
    let request = CourseUpdateDBRequest {
        course_name,
        teacher,
        course_table,
        max_students,
    };

    if !state.store.update_course(id, request).await? {
        return Err(course_not_found());
    }

    Ok(Json(MessageResponse {
        message: "Course updated successfully".to_string(),
    }))
}

/// Delete a course by identifier
#[utoipa::path(
    delete,
    path = "/api/v1/delete/course",
    tag = "Courses Service",
    summary = "Delete a course by ID",
    description = "Deletes the course and every enrollment in it.",
    params(CourseIdQuery),
    responses(
        (status = 200, description = "Course deleted", body = StatusResponse),
        (status = 400, description = "Missing or repeated course_id", body = ErrorResponse),
        (status = 404, description = "Course not found", body = StatusResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[instrument(skip_all)]
pub async fn delete_course(
    State(state): State<AppState>,
    query: std::result::Result<Query<CourseIdQuery>, QueryRejection>,
) -> Result<Json<StatusResponse>> {
    let query = query_or_reject(query, delete_id_required)?;
    let raw_id = present_id(query.course_id).ok_or_else(delete_id_required)?;

    let deleted = match parse_id(&raw_id) {
        Some(id) => state.store.delete_course(id).await?,
        None => None,
    };

    match deleted {
        Some(_) => Ok(Json(StatusResponse::success(format!("Course with ID {raw_id} has been deleted")))),
        None => Err(Error::NotFound {
            resource: "Course".to_string(),
            id: raw_id,
        }),
    }
}
