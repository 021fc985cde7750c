use axum::{Router, routing::get};

use super::handlers::classes_by_date;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/:show_id/classes/date/:date", get(classes_by_date))
}
