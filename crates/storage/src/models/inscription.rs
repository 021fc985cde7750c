use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// An inscription with the class it is tied to already resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Inscription {
    pub id: i32,
    pub horse_id: i32,
    pub rider_id: i32,
    pub class_id: i32,
    pub rider_entry_number: i32,
}

/// A rider and horse pair entered in a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ClassEntry {
    pub inscription_id: i32,
    pub rider_id: i32,
    pub rider_name: String,
    pub horse_id: i32,
    pub horse_name: String,
    pub rider_entry_number: i32,
}
