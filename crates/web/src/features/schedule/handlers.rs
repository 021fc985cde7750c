use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::schedule::{
        ConfirmScheduleRequest, ConfirmScheduleResponse, ScheduleDraft, ScheduleView,
        validate_iso_date,
    },
    error::StorageError,
    services::spacing::SpacingPolicy,
};
use validator::Validate;

use crate::error::{WebError, WebResult};

use super::services;

/// Message key returned once a schedule is stored
pub const SCHEDULE_CREATED: &str = "schedule.creationSuccess";

#[utoipa::path(
    post,
    path = "/api/shows/{show_id}/schedule",
    params(
        ("show_id" = i32, Path, description = "Show id")
    ),
    responses(
        (status = 201, description = "Draft generated from the show's inscriptions", body = ScheduleDraft),
        (status = 404, description = "Show not found")
    ),
    tag = "schedule"
)]
pub async fn generate_draft(
    State(db): State<Database>,
    Path(show_id): Path<i32>,
) -> WebResult<Response> {
    tracing::info!(show_id, "Generating schedule draft");

    let draft = services::generate_draft(db.pool(), show_id).await?;

    Ok((StatusCode::CREATED, Json(draft)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/shows/{show_id}/schedule/date/{date}/confirmSchedule",
    request_body = ConfirmScheduleRequest,
    params(
        ("show_id" = i32, Path, description = "Show id"),
        ("date" = String, Path, description = "Show day the schedule covers")
    ),
    responses(
        (status = 201, description = "Schedule stored, replacing any previous one for the date", body = ConfirmScheduleResponse),
        (status = 400, description = "Invalid date, validation error or rest window violation"),
        (status = 404, description = "Show not found")
    ),
    tag = "schedule"
)]
pub async fn confirm_schedule(
    State(db): State<Database>,
    State(spacing): State<SpacingPolicy>,
    Path((show_id, date)): Path<(i32, String)>,
    payload: Result<Json<ConfirmScheduleRequest>, JsonRejection>,
) -> WebResult<Response> {
    tracing::info!(show_id, date = %date, "Confirming schedule");

    validate_iso_date(&date)
        .map_err(|_| WebError::BadRequest("Invalid schedule date".to_string()))?;

    let Json(req) = payload?;
    req.validate()?;

    services::confirm_schedule(db.pool(), show_id, &date, req, &spacing).await?;

    let response = ConfirmScheduleResponse {
        message: SCHEDULE_CREATED.to_string(),
    };

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/shows/{show_id}/schedule/date/{date}",
    params(
        ("show_id" = i32, Path, description = "Show id"),
        ("date" = String, Path, description = "Show day")
    ),
    responses(
        (status = 200, description = "Persisted schedule followed by unscheduled classes", body = ScheduleView),
        (status = 404, description = "No schedule for this date")
    ),
    tag = "schedule"
)]
pub async fn get_schedule(
    State(db): State<Database>,
    Path((show_id, date)): Path<(i32, String)>,
) -> WebResult<Response> {
    tracing::info!(show_id, date = %date, "Fetching schedule");

    let schedule = services::get_schedule(db.pool(), show_id, &date)
        .await?
        .ok_or(StorageError::NotFound)?;

    Ok(Json(schedule).into_response())
}
