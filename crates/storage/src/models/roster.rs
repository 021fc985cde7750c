/// Name carried by placeholder entries that mark a pause in a ring
pub const BREAK_NAME: &str = "BREAK";

/// One line of a class roster in a confirmed schedule.
///
/// A schedule submitted by a human scheduler mixes real rider/horse pairs with
/// pauses, marked by a horse named `BREAK`. A pause never counts as a horse
/// sighting; its rider id still counts when it is not negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterEntry {
    Rider(RiderSlot),
    Break(BreakSlot),
}

impl RosterEntry {
    pub fn time_start(&self) -> &str {
        match self {
            Self::Rider(slot) => &slot.time_start,
            Self::Break(slot) => &slot.time_start,
        }
    }

    pub fn as_rider(&self) -> Option<&RiderSlot> {
        match self {
            Self::Rider(slot) => Some(slot),
            Self::Break(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiderSlot {
    pub rider_id: i32,
    pub rider_name: String,
    pub horse_id: i32,
    pub horse_name: String,
    pub time_start: String,
    pub rider_entry_number: i32,
}

impl RiderSlot {
    /// Standby entries use negative rider ids and do not identify a real rider
    pub fn is_synthetic(&self) -> bool {
        self.rider_id < 0
    }
}

/// A pause, kept with the rider fields the client sent so it reads back unchanged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakSlot {
    pub id: i32,
    pub label: String,
    pub horse_id: i32,
    pub time_start: String,
    pub rider_entry_number: i32,
}
