use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::roster::RosterEntry;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ScheduleRecord {
    pub id: i32,
    pub show_id: i32,
    /// Kept as the literal string the schedule was confirmed under
    pub schedule_date: String,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub struct RingScheduleRow {
    pub id: i32,
    pub schedule_id: i32,
    pub name: String,
    pub start_time: String,
    pub date: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct ClassScheduleRow {
    pub id: i32,
    pub ring_schedule_id: i32,
    pub class_id: Option<i32>,
    pub number: String,
    pub name: String,
    pub duration_minute: i32,
    pub test: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct RiderScheduleRow {
    pub id: i32,
    pub class_schedule_id: i32,
    pub rider_id: i32,
    pub name: String,
    pub time_start: String,
    pub rider_entry_number: i32,
    pub horse_id: i32,
    pub horse_name: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct JudgeScheduleRow {
    pub id: i32,
    pub class_schedule_id: i32,
    pub name: String,
    pub position: String,
}

/// Identifies a class already placed in some persisted schedule of a show
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ScheduledClassRef {
    pub class_id: Option<i32>,
    pub number: String,
}

/// A validated, time-assigned schedule ready to be persisted
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SchedulePlan {
    pub rings: Vec<RingPlan>,
}

impl SchedulePlan {
    /// Every roster entry in document order: ring by ring, class by class
    pub fn entries(&self) -> impl Iterator<Item = &RosterEntry> {
        self.rings
            .iter()
            .flat_map(|ring| ring.classes.iter())
            .flat_map(|class| class.entries.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingPlan {
    pub name: String,
    pub start_time: String,
    pub date: String,
    pub classes: Vec<ClassPlan>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassPlan {
    pub class_id: Option<i32>,
    pub number: String,
    pub name: String,
    pub duration_minute: i32,
    pub test: String,
    pub entries: Vec<RosterEntry>,
    pub judges: Vec<JudgeSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgeSlot {
    pub name: String,
    pub position: String,
}
