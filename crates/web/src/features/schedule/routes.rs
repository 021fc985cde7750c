use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{confirm_schedule, generate_draft, get_schedule};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/:show_id/schedule", post(generate_draft))
        .route("/:show_id/schedule/date/:date", get(get_schedule))
        .route(
            "/:show_id/schedule/date/:date/confirmSchedule",
            post(confirm_schedule),
        )
}
