use sqlx::PgPool;
use storage::{
    dto::schedule::ClassesByDateResponse,
    error::Result,
    repository::{ScheduleRepository, ShowRepository},
    services::scheduling,
};

/// Classes of a show day, as a persisted schedule when one exists
pub async fn classes_by_date(
    pool: &PgPool,
    show_id: i32,
    date: &str,
) -> Result<Option<ClassesByDateResponse>> {
    let shows = ShowRepository::new(pool);
    let schedules = ScheduleRepository::new(pool);
    scheduling::classes_by_date(&shows, &schedules, show_id, date).await
}
