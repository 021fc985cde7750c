use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A class (one competitive event) of a show
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ShowClass {
    pub id: i32,
    pub show_id: i32,
    pub test_id: i32,
    /// Not guaranteed unique within a show
    pub number: String,
    pub name: String,
    pub ring_name: String,
    pub ring_number: i32,
}
