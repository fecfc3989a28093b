use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::NaiveDate;
use tracing::instrument;

use crate::{
    AppState,
    api::{
        models::{
            enrollments::{EnrollmentCreate, EnrollmentResponse},
            responses::{DataResponse, ErrorResponse},
        },
        validation::{body_or_default, present},
    },
    db::models::enrollments::EnrollmentCreateDBRequest,
    errors::{Error, Result},
    types::parse_id,
};

const CREATE_FIELDS_REQUIRED: &str = "Send please student_id, course_id, enrolment_date!";

fn malformed(message: &str) -> Error {
    Error::BadRequest {
        message: message.to_string(),
    }
}

/// Enroll a student in a course.
///
/// The student and course are not looked up first; an unknown identifier is rejected by the
/// store and reported as a 500.
#[utoipa::path(
    post,
    path = "/api/v1/create/enrollment",
    tag = "Enrollments Service",
    summary = "Create a new enrollment",
    request_body = EnrollmentCreate,
    responses(
        (status = 201, description = "Enrollment created", body = DataResponse<EnrollmentResponse>),
        (status = 400, description = "Missing or malformed fields", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[instrument(skip_all)]
pub async fn create_enrollment(
    State(state): State<AppState>,
    body: std::result::Result<Json<EnrollmentCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<DataResponse<EnrollmentResponse>>)> {
    let EnrollmentCreate {
        student_id,
        course_id,
        enrollment_date,
    } = body_or_default(body);

    let (Some(student_id), Some(course_id), Some(enrollment_date)) =
        (present(student_id), present(course_id), present(enrollment_date))
    else {
        return Err(Error::BadRequest {
            message: CREATE_FIELDS_REQUIRED.to_string(),
        });
    };

    let student_id = parse_id(&student_id).ok_or_else(|| malformed("student_id must be a UUID"))?;
    let course_id = parse_id(&course_id).ok_or_else(|| malformed("course_id must be a UUID"))?;
    let enrollment_date = NaiveDate::parse_from_str(enrollment_date.trim(), "%Y-%m-%d")
        .map_err(|_| malformed("enrollment_date must be a date in YYYY-MM-DD format"))?;

    let enrollment = state
        .store
        .create_enrollment(EnrollmentCreateDBRequest::new(student_id, course_id, enrollment_date))
        .await?;

    Ok((StatusCode::CREATED, Json(DataResponse::new(enrollment.into()))))
}

/// List all enrollments
#[utoipa::path(
    get,
    path = "/api/v1/get-all/enrollments",
    tag = "Enrollments Service",
    summary = "Get all enrollments",
    responses(
        (status = 200, description = "All enrollments", body = DataResponse<Vec<EnrollmentResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[instrument(skip_all)]
pub async fn list_enrollments(State(state): State<AppState>) -> Result<Json<DataResponse<Vec<EnrollmentResponse>>>> {
    let enrollments = state.store.list_enrollments().await?;
    Ok(Json(DataResponse::new(enrollments.into_iter().map(Into::into).collect())))
}
