use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{Database, dto::schedule::ClassesByDateResponse};

use crate::error::WebResult;

use super::services;

#[utoipa::path(
    get,
    path = "/api/shows/{show_id}/classes/date/{date}",
    params(
        ("show_id" = i32, Path, description = "Show id"),
        ("date" = String, Path, description = "Show day")
    ),
    responses(
        (status = 200, description = "Schedule of the day, or the classes still to schedule", body = ClassesByDateResponse),
        (status = 204, description = "No schedule and no class to schedule")
    ),
    tag = "shows"
)]
pub async fn classes_by_date(
    State(db): State<Database>,
    Path((show_id, date)): Path<(i32, String)>,
) -> WebResult<Response> {
    tracing::info!(show_id, date = %date, "Listing classes by date");

    match services::classes_by_date(db.pool(), show_id, &date).await? {
        Some(classes) => Ok(Json(classes).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}
