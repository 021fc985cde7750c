use std::borrow::Cow;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::models::{
    BREAK_NAME, BreakSlot, ClassPlan, JudgePosition, JudgeSlot, RiderSlot, RingPlan, RosterEntry,
    SchedulePlan,
};
use crate::services::spacing::parse_clock;

/// Horse reference attached to a scheduled rider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct HorseRef {
    pub id: i32,

    #[validate(custom(function = "validate_label"))]
    pub name: String,
}

/// A rider line as exchanged with the scheduling client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ScheduledRider {
    /// Negative for standby entries and breaks
    pub id: i32,

    #[validate(custom(function = "validate_label"))]
    pub name: String,

    #[validate(custom(function = "validate_clock_time"))]
    pub time_start: String,

    #[validate(range(min = 0, message = "Entry number must be positive"))]
    pub rider_entry_number: i32,

    #[validate(nested)]
    pub horse: HorseRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ScheduledJudge {
    #[validate(custom(function = "validate_label"))]
    pub name: String,

    #[validate(custom(function = "validate_judge_position"))]
    pub position: String,
}

/// A class with its roster and judges
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ScheduledClass {
    /// Class id, present on generated drafts and echoed back by clients
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,

    #[validate(custom(function = "validate_class_number"))]
    pub number: String,

    #[validate(custom(function = "validate_label"))]
    pub name: String,

    #[validate(range(min = 0, message = "Duration must be positive"))]
    pub duration_minute: i32,

    #[validate(custom(function = "validate_test_name"))]
    pub test: String,

    #[validate(nested)]
    pub riders: Vec<ScheduledRider>,

    #[validate(nested)]
    pub judges: Vec<ScheduledJudge>,
}

/// A ring of a confirmed schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ScheduledRing {
    #[validate(custom(function = "validate_label"))]
    pub name: String,

    #[validate(custom(function = "validate_clock_time"))]
    pub start_time: String,

    #[validate(custom(function = "validate_iso_date"))]
    pub date: String,

    #[serde(rename = "ClassSchedule", alias = "classes")]
    #[validate(nested)]
    pub classes: Vec<ScheduledClass>,
}

/// Request payload for confirming a schedule
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ConfirmScheduleRequest {
    #[validate(nested)]
    pub rings: Vec<ScheduledRing>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConfirmScheduleResponse {
    pub message: String,
}

/// A ring of a generated draft, before start times are assigned
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DraftRing {
    pub name: String,
    pub number: i32,
    pub classes: Vec<ScheduledClass>,
}

/// An entity entered in several inscriptions of a show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SharedEntry {
    pub id: i32,
    pub inscription_ids: Vec<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ConflictReport {
    pub shared_horses: Vec<SharedEntry>,
    pub shared_riders: Vec<SharedEntry>,
}

/// Server-computed proposal; not persisted
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScheduleDraft {
    pub rings: Vec<DraftRing>,
    pub conflicts: ConflictReport,
}

/// A persisted schedule followed by the classes it does not cover yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScheduleView {
    pub rings: Vec<ScheduledRing>,
    pub classes: Vec<ScheduledClass>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ClassesByDate {
    Scheduled(ScheduleView),
    Unscheduled(Vec<ScheduledClass>),
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClassesByDateResponse {
    pub is_schedule: bool,
    pub data: ClassesByDate,
}

// Validation helpers
fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn is_label_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || ('\u{C0}'..='\u{FF}').contains(&c)
        || matches!(c, '_' | '\'' | '-')
        || c.is_whitespace()
}

fn is_label(value: &str) -> bool {
    !value.trim().is_empty() && value.chars().all(is_label_char)
}

fn validate_label(value: &str) -> Result<(), ValidationError> {
    if is_label(value) {
        Ok(())
    } else {
        Err(invalid(
            "invalid_name",
            "Must contain only letters, digits, spaces, apostrophes, hyphens or underscores",
        ))
    }
}

fn validate_clock_time(value: &str) -> Result<(), ValidationError> {
    match parse_clock(value) {
        Some(_) => Ok(()),
        None => Err(invalid("invalid_time", "Must be a 24-hour HH:MM time")),
    }
}

/// Longest date string the schedule tables store
const MAX_DATE_LEN: usize = 64;

/// Ring dates and the confirmed schedule date: `YYYY-MM-DD` or RFC 3339
pub fn validate_iso_date(value: &str) -> Result<(), ValidationError> {
    let is_date = value.len() <= MAX_DATE_LEN
        && (NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
            || DateTime::parse_from_rfc3339(value).is_ok());

    if is_date {
        Ok(())
    } else {
        Err(invalid("invalid_date", "Must be an ISO 8601 date"))
    }
}

fn validate_class_number(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(invalid("invalid_class_number", "Must be a number"))
    }
}

fn validate_test_name(value: &str) -> Result<(), ValidationError> {
    let is_valid = value
        .split_once('(')
        .and_then(|(name, rest)| rest.split_once(')').map(|(detail, _)| (name, detail)))
        .is_some_and(|(name, detail)| is_label(name) && is_label(detail));

    if is_valid {
        Ok(())
    } else {
        Err(invalid("invalid_test", "Must look like Name(Detail)"))
    }
}

fn validate_judge_position(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<JudgePosition>()
        .map(|_| ())
        .map_err(|_| invalid("invalid_position", "Must be one of E, H, C, M, B"))
}

/// Only the horse name marks a pause; a rider called `BREAK` on a real horse is a rider
impl From<ScheduledRider> for RosterEntry {
    fn from(rider: ScheduledRider) -> Self {
        if rider.horse.name == BREAK_NAME {
            return RosterEntry::Break(BreakSlot {
                id: rider.id,
                label: rider.name,
                horse_id: rider.horse.id,
                time_start: rider.time_start,
                rider_entry_number: rider.rider_entry_number,
            });
        }

        RosterEntry::Rider(RiderSlot {
            rider_id: rider.id,
            rider_name: rider.name,
            horse_id: rider.horse.id,
            horse_name: rider.horse.name,
            time_start: rider.time_start,
            rider_entry_number: rider.rider_entry_number,
        })
    }
}

impl From<RosterEntry> for ScheduledRider {
    fn from(entry: RosterEntry) -> Self {
        match entry {
            RosterEntry::Rider(slot) => Self {
                id: slot.rider_id,
                name: slot.rider_name,
                time_start: slot.time_start,
                rider_entry_number: slot.rider_entry_number,
                horse: HorseRef {
                    id: slot.horse_id,
                    name: slot.horse_name,
                },
            },
            RosterEntry::Break(slot) => Self {
                id: slot.id,
                name: slot.label,
                time_start: slot.time_start,
                rider_entry_number: slot.rider_entry_number,
                horse: HorseRef {
                    id: slot.horse_id,
                    name: BREAK_NAME.to_string(),
                },
            },
        }
    }
}

impl From<ScheduledJudge> for JudgeSlot {
    fn from(judge: ScheduledJudge) -> Self {
        Self {
            name: judge.name,
            position: judge.position,
        }
    }
}

impl From<JudgeSlot> for ScheduledJudge {
    fn from(judge: JudgeSlot) -> Self {
        Self {
            name: judge.name,
            position: judge.position,
        }
    }
}

impl From<ScheduledClass> for ClassPlan {
    fn from(class: ScheduledClass) -> Self {
        Self {
            class_id: class.id,
            number: class.number,
            name: class.name,
            duration_minute: class.duration_minute,
            test: class.test,
            entries: class.riders.into_iter().map(RosterEntry::from).collect(),
            judges: class.judges.into_iter().map(JudgeSlot::from).collect(),
        }
    }
}

impl From<ClassPlan> for ScheduledClass {
    fn from(class: ClassPlan) -> Self {
        Self {
            id: class.class_id,
            number: class.number,
            name: class.name,
            duration_minute: class.duration_minute,
            test: class.test,
            riders: class.entries.into_iter().map(ScheduledRider::from).collect(),
            judges: class.judges.into_iter().map(ScheduledJudge::from).collect(),
        }
    }
}

impl From<ScheduledRing> for RingPlan {
    fn from(ring: ScheduledRing) -> Self {
        Self {
            name: ring.name,
            start_time: ring.start_time,
            date: ring.date,
            classes: ring.classes.into_iter().map(ClassPlan::from).collect(),
        }
    }
}

impl From<RingPlan> for ScheduledRing {
    fn from(ring: RingPlan) -> Self {
        Self {
            name: ring.name,
            start_time: ring.start_time,
            date: ring.date,
            classes: ring.classes.into_iter().map(ScheduledClass::from).collect(),
        }
    }
}

impl From<ConfirmScheduleRequest> for SchedulePlan {
    fn from(request: ConfirmScheduleRequest) -> Self {
        Self {
            rings: request.rings.into_iter().map(RingPlan::from).collect(),
        }
    }
}
