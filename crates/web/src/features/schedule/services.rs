use sqlx::PgPool;
use storage::{
    dto::schedule::{ConfirmScheduleRequest, ScheduleDraft, ScheduleView},
    error::Result,
    models::SchedulePlan,
    repository::{ScheduleRepository, ShowRepository},
    services::{scheduling, spacing::SpacingPolicy},
};

/// Generate a draft schedule from the show's inscriptions
pub async fn generate_draft(pool: &PgPool, show_id: i32) -> Result<ScheduleDraft> {
    let shows = ShowRepository::new(pool);
    scheduling::generate_draft(&shows, show_id).await
}

/// Check rest windows and replace the schedule of the show for `date`
pub async fn confirm_schedule(
    pool: &PgPool,
    show_id: i32,
    date: &str,
    request: ConfirmScheduleRequest,
    policy: &SpacingPolicy,
) -> Result<i32> {
    let plan = SchedulePlan::from(request);
    let schedules = ScheduleRepository::new(pool);
    scheduling::confirm_schedule(&schedules, show_id, date, &plan, policy).await
}

/// Get the persisted schedule for a date, with the classes still to place
pub async fn get_schedule(pool: &PgPool, show_id: i32, date: &str) -> Result<Option<ScheduleView>> {
    let shows = ShowRepository::new(pool);
    let schedules = ScheduleRepository::new(pool);
    scheduling::get_schedule(&shows, &schedules, show_id, date).await
}
