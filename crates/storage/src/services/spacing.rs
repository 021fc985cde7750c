//! Rest-window checks on a submitted schedule.
//!
//! Two independent passes walk every roster entry in document order. The first
//! is keyed by rider id, the second by horse id. A repeat sighting closer than
//! the minimum rest window to the previous sighting of the same rider (or
//! horse) rejects the whole schedule. Each pass compares against the
//! immediately prior sighting, not the first one.
//!
//! Pause rows (horse named `BREAK`) never take part in the horse pass. They
//! take part in the rider pass when they carry a real rider id.

use std::collections::HashMap;

use thiserror::Error;

use crate::models::{BREAK_NAME, RosterEntry, SchedulePlan};

pub const DEFAULT_MIN_REST_MINUTES: u32 = 45;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpacingPolicy {
    pub min_rest_minutes: u32,
}

impl Default for SpacingPolicy {
    fn default() -> Self {
        Self {
            min_rest_minutes: DEFAULT_MIN_REST_MINUTES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpacingViolation {
    #[error(
        "The rider {rider} with the horse {horse} has less than {minutes} minutes between the time start"
    )]
    Rider {
        rider: String,
        horse: String,
        minutes: u32,
    },

    #[error("The horse {horse} has less than {minutes} minutes between the time start")]
    Horse { horse: String, minutes: u32 },

    #[error("Invalid start time: {value}")]
    InvalidTime { value: String },
}

/// Parse a 24-hour `HH:MM` time into minutes since midnight
pub fn parse_clock(value: &str) -> Option<u32> {
    let (hours, minutes) = value.split_once(':')?;

    if hours.len() != 2 || minutes.len() != 2 {
        return None;
    }
    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;

    if hours > 23 || minutes > 59 {
        return None;
    }

    Some(hours * 60 + minutes)
}

/// Run both passes; the rider pass reports first
pub fn check_spacing(plan: &SchedulePlan, policy: &SpacingPolicy) -> Result<(), SpacingViolation> {
    check_rider_spacing(plan, policy)?;
    check_horse_spacing(plan, policy)
}

pub fn check_rider_spacing(
    plan: &SchedulePlan,
    policy: &SpacingPolicy,
) -> Result<(), SpacingViolation> {
    let starts = plan.entries().filter_map(|entry| match entry {
        RosterEntry::Rider(slot) if !slot.is_synthetic() => Some(Start {
            key: slot.rider_id,
            rider: &slot.rider_name,
            horse: &slot.horse_name,
            time_start: &slot.time_start,
        }),
        // A real rider booked on a pause row still needs rest around it
        RosterEntry::Break(slot) if slot.id >= 0 => Some(Start {
            key: slot.id,
            rider: &slot.label,
            horse: BREAK_NAME,
            time_start: &slot.time_start,
        }),
        _ => None,
    });

    check_pass(starts, policy, |start| SpacingViolation::Rider {
        rider: start.rider.to_string(),
        horse: start.horse.to_string(),
        minutes: policy.min_rest_minutes,
    })
}

pub fn check_horse_spacing(
    plan: &SchedulePlan,
    policy: &SpacingPolicy,
) -> Result<(), SpacingViolation> {
    let starts = plan
        .entries()
        .filter_map(RosterEntry::as_rider)
        .map(|slot| Start {
            key: slot.horse_id,
            rider: &slot.rider_name,
            horse: &slot.horse_name,
            time_start: &slot.time_start,
        });

    check_pass(starts, policy, |start| SpacingViolation::Horse {
        horse: start.horse.to_string(),
        minutes: policy.min_rest_minutes,
    })
}

/// One sighting of a rider or horse, keyed by the id the pass tracks
struct Start<'a> {
    key: i32,
    rider: &'a str,
    horse: &'a str,
    time_start: &'a str,
}

fn check_pass<'a>(
    starts: impl Iterator<Item = Start<'a>>,
    policy: &SpacingPolicy,
    violation: impl Fn(&Start<'a>) -> SpacingViolation,
) -> Result<(), SpacingViolation> {
    let mut last_seen: HashMap<i32, u32> = HashMap::new();

    for start in starts {
        let minutes = parse_clock(start.time_start).ok_or_else(|| SpacingViolation::InvalidTime {
            value: start.time_start.to_string(),
        })?;

        if let Some(previous) = last_seen.insert(start.key, minutes) {
            if previous.abs_diff(minutes) < policy.min_rest_minutes {
                return Err(violation(&start));
            }
        }
    }

    Ok(())
}
