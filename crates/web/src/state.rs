use axum::extract::FromRef;
use storage::Database;
use storage::services::spacing::SpacingPolicy;

/// Shared state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub spacing: SpacingPolicy,
}

impl AppState {
    pub fn new(db: Database, spacing: SpacingPolicy) -> Self {
        Self { db, spacing }
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for SpacingPolicy {
    fn from_ref(state: &AppState) -> Self {
        state.spacing
    }
}
