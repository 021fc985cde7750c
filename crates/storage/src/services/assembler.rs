use std::collections::{BTreeMap, HashMap};

use super::roster::ClassRoster;
use crate::dto::schedule::{ConflictReport, DraftRing, ScheduleDraft, ScheduledClass};
use crate::error::{Result, StorageError};
use crate::models::{DressageTest, ScheduledClassRef, ShowClass};

/// Build the draft tree: classes grouped by ring, rings ordered by number then
/// name, classes inside a ring following `order`.
///
/// Classes missing from `order` are not placed.
pub fn assemble_draft(
    classes: &[ShowClass],
    tests: &[DressageTest],
    order: &[i32],
    rosters: &HashMap<i32, ClassRoster>,
    conflicts: ConflictReport,
) -> Result<ScheduleDraft> {
    let by_id: HashMap<i32, &ShowClass> = classes.iter().map(|class| (class.id, class)).collect();
    let mut rings: BTreeMap<(i32, &str), Vec<ScheduledClass>> = BTreeMap::new();

    for class_id in order {
        let Some(class) = by_id.get(class_id) else {
            continue;
        };

        let scheduled = scheduled_class(class, tests, rosters.get(class_id))?;
        rings
            .entry((class.ring_number, class.ring_name.as_str()))
            .or_default()
            .push(scheduled);
    }

    let rings = rings
        .into_iter()
        .map(|((number, name), classes)| DraftRing {
            name: name.to_string(),
            number,
            classes,
        })
        .collect();

    Ok(ScheduleDraft { rings, conflicts })
}

/// Attach test metadata and roster to a class
pub fn scheduled_class(
    class: &ShowClass,
    tests: &[DressageTest],
    roster: Option<&ClassRoster>,
) -> Result<ScheduledClass> {
    let test = tests
        .iter()
        .find(|test| test.id == class.test_id)
        .ok_or_else(|| {
            StorageError::MissingReference(format!(
                "test {} of class {} not found",
                class.test_id, class.id
            ))
        })?;

    let roster = roster.cloned().unwrap_or_default();

    Ok(ScheduledClass {
        id: Some(class.id),
        number: class.number.clone(),
        name: class.name.clone(),
        duration_minute: test.duration_minute,
        test: test.short_name.clone(),
        riders: roster.riders,
        judges: roster.judges,
    })
}

/// Whether a class is already placed in a persisted schedule.
///
/// Persisted rows carrying a class id match on id; older rows without one fall
/// back to the class number.
pub fn is_scheduled(class: &ShowClass, scheduled: &[ScheduledClassRef]) -> bool {
    scheduled.iter().any(|reference| match reference.class_id {
        Some(class_id) => class_id == class.id,
        None => reference.number == class.number,
    })
}

pub fn unscheduled_classes<'a>(
    classes: &'a [ShowClass],
    scheduled: &[ScheduledClassRef],
) -> Vec<&'a ShowClass> {
    classes
        .iter()
        .filter(|class| !is_scheduled(class, scheduled))
        .collect()
}
