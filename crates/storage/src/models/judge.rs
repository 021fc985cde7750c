use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Judge {
    pub id: i32,
    pub class_id: i32,
    pub name: String,
    pub ring_position: String,
}

/// Letter marking where a judge sits around the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum JudgePosition {
    E,
    H,
    C,
    M,
    B,
}

impl JudgePosition {
    pub const ALL: [JudgePosition; 5] = [Self::E, Self::H, Self::C, Self::M, Self::B];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E => "E",
            Self::H => "H",
            Self::C => "C",
            Self::M => "M",
            Self::B => "B",
        }
    }
}

impl fmt::Display for JudgePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JudgePosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|position| position.as_str() == s)
            .ok_or_else(|| format!("Unknown judge position: {}", s))
    }
}
