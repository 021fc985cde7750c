//! Draft generation, confirmation and retrieval of show schedules.
//!
//! Draft generation runs the conflict analyzer, the ordering engine, the
//! roster builder and the assembler in turn. Confirmation validates the
//! rest windows before anything is written.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use super::{assembler, conflicts, ordering, roster};
use crate::dto::schedule::{
    ClassesByDate, ClassesByDateResponse, ScheduleDraft, ScheduleView, ScheduledClass,
    ScheduledRing,
};
use crate::error::Result;
use crate::models::{SchedulePlan, ShowClass};
use crate::repository::{ScheduleStore, ShowDataProvider};
use crate::services::spacing::{SpacingPolicy, check_spacing};

/// Propose a schedule for every class of the show, with placeholder start times
pub async fn generate_draft<P>(provider: &P, show_id: i32) -> Result<ScheduleDraft>
where
    P: ShowDataProvider + ?Sized,
{
    provider.find_show(show_id).await?;

    let inscriptions = provider.inscriptions_by_show(show_id).await?;
    let shared = conflicts::analyze(&inscriptions);
    let priority = ordering::order_by_shared_weight(&shared);

    debug!(
        show_id,
        inscriptions = inscriptions.len(),
        prioritized_classes = priority.len(),
        "Analyzed shared horses and riders"
    );

    let classes = provider.classes_in_show(show_id).await?;
    let class_ids: Vec<i32> = classes.iter().map(|class| class.id).collect();
    let tests = provider.tests_for_classes(&classes).await?;
    let judges = provider.judges_for_classes(&class_ids).await?;

    let order = ordering::complete_order(&priority, class_ids.iter().copied());

    let mut rosters = HashMap::with_capacity(classes.len());
    for class in &classes {
        let class_roster = roster::build_roster(provider, class.id, &judges).await?;
        rosters.insert(class.id, class_roster);
    }

    let draft = assembler::assemble_draft(
        &classes,
        &tests,
        &order,
        &rosters,
        conflicts::shared_across_show(&inscriptions),
    )?;

    info!(
        show_id,
        rings = draft.rings.len(),
        classes = classes.len(),
        "Generated schedule draft"
    );

    Ok(draft)
}

/// Validate rest windows, then replace the show's schedule for `date`
pub async fn confirm_schedule<S>(
    store: &S,
    show_id: i32,
    date: &str,
    plan: &SchedulePlan,
    policy: &SpacingPolicy,
) -> Result<i32>
where
    S: ScheduleStore + ?Sized,
{
    if let Err(violation) = check_spacing(plan, policy) {
        warn!(show_id, date, %violation, "Rejected schedule submission");
        return Err(violation.into());
    }

    let schedule_id = store.replace_schedule(show_id, date, plan).await?;

    info!(show_id, date, schedule_id, rings = plan.rings.len(), "Schedule confirmed");

    Ok(schedule_id)
}

pub async fn schedule_exists<S>(store: &S, show_id: i32, date: &str) -> Result<bool>
where
    S: ScheduleStore + ?Sized,
{
    store.schedule_exists(show_id, date).await
}

/// Classes of the show not placed in any of its persisted schedules
pub async fn unscheduled_classes<P, S>(
    provider: &P,
    store: &S,
    show_id: i32,
) -> Result<Vec<ScheduledClass>>
where
    P: ShowDataProvider + ?Sized,
    S: ScheduleStore + ?Sized,
{
    let classes = provider.classes_in_show(show_id).await?;
    let scheduled = store.scheduled_class_refs(show_id).await?;

    let remaining: Vec<ShowClass> = assembler::unscheduled_classes(&classes, &scheduled)
        .into_iter()
        .cloned()
        .collect();

    if remaining.is_empty() {
        return Ok(Vec::new());
    }

    let class_ids: Vec<i32> = remaining.iter().map(|class| class.id).collect();
    let tests = provider.tests_for_classes(&remaining).await?;
    let judges = provider.judges_for_classes(&class_ids).await?;

    let mut result = Vec::with_capacity(remaining.len());
    for class in &remaining {
        let class_roster = roster::build_roster(provider, class.id, &judges).await?;
        result.push(assembler::scheduled_class(class, &tests, Some(&class_roster))?);
    }

    Ok(result)
}

/// The persisted schedule for `date`, followed by the classes still to place
pub async fn get_schedule<P, S>(
    provider: &P,
    store: &S,
    show_id: i32,
    date: &str,
) -> Result<Option<ScheduleView>>
where
    P: ShowDataProvider + ?Sized,
    S: ScheduleStore + ?Sized,
{
    let Some(plan) = store.load_schedule(show_id, date).await? else {
        return Ok(None);
    };

    let rings: Vec<ScheduledRing> = plan.rings.into_iter().map(ScheduledRing::from).collect();
    let classes = unscheduled_classes(provider, store, show_id).await?;

    Ok(Some(ScheduleView { rings, classes }))
}

/// Admin view of a show day; `None` when there is neither a schedule nor a class to place
pub async fn classes_by_date<P, S>(
    provider: &P,
    store: &S,
    show_id: i32,
    date: &str,
) -> Result<Option<ClassesByDateResponse>>
where
    P: ShowDataProvider + ?Sized,
    S: ScheduleStore + ?Sized,
{
    if schedule_exists(store, show_id, date).await? {
        if let Some(view) = get_schedule(provider, store, show_id, date).await? {
            return Ok(Some(ClassesByDateResponse {
                is_schedule: true,
                data: ClassesByDate::Scheduled(view),
            }));
        }
    }

    let classes = unscheduled_classes(provider, store, show_id).await?;
    if classes.is_empty() {
        return Ok(None);
    }

    Ok(Some(ClassesByDateResponse {
        is_schedule: false,
        data: ClassesByDate::Unscheduled(classes),
    }))
}
