use crate::dto::schedule::{HorseRef, ScheduledJudge, ScheduledRider};
use crate::error::Result;
use crate::models::{ClassEntry, Judge};
use crate::repository::ShowDataProvider;

/// Start time given to riders until a human scheduler assigns one
pub const PLACEHOLDER_TIME: &str = "00:00";

/// Riders and judges of one class
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassRoster {
    pub riders: Vec<ScheduledRider>,
    pub judges: Vec<ScheduledJudge>,
}

/// Resolve the roster of a class; a class without entries or judges yields empty lists
pub async fn build_roster<P: ShowDataProvider + ?Sized>(
    provider: &P,
    class_id: i32,
    judges: &[Judge],
) -> Result<ClassRoster> {
    let entries = provider.class_entries(class_id).await?;

    Ok(roster_from_parts(&entries, judges, class_id))
}

/// Assemble a roster from already-loaded entries; `judges` may span several classes
pub fn roster_from_parts(entries: &[ClassEntry], judges: &[Judge], class_id: i32) -> ClassRoster {
    let riders = entries
        .iter()
        .map(|entry| ScheduledRider {
            id: entry.rider_id,
            name: entry.rider_name.clone(),
            time_start: PLACEHOLDER_TIME.to_string(),
            rider_entry_number: entry.rider_entry_number,
            horse: HorseRef {
                id: entry.horse_id,
                name: entry.horse_name.clone(),
            },
        })
        .collect();

    let judges = judges
        .iter()
        .filter(|judge| judge.class_id == class_id)
        .map(|judge| ScheduledJudge {
            name: judge.name.clone(),
            position: judge.ring_position.clone(),
        })
        .collect();

    ClassRoster { riders, judges }
}
