//! Data providers consumed by the scheduling services, and their PostgreSQL
//! implementations.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    ClassEntry, DressageTest, Inscription, Judge, ScheduledClassRef, SchedulePlan, Show, ShowClass,
};

pub mod schedule;
pub mod show;

pub use schedule::ScheduleRepository;
pub use show::ShowRepository;

/// Read-only access to the show data the scheduler works from
#[async_trait]
pub trait ShowDataProvider: Send + Sync {
    async fn find_show(&self, show_id: i32) -> Result<Show>;

    /// Inscriptions of the show, each resolved to its class
    async fn inscriptions_by_show(&self, show_id: i32) -> Result<Vec<Inscription>>;

    async fn classes_in_show(&self, show_id: i32) -> Result<Vec<ShowClass>>;

    async fn tests_for_classes(&self, classes: &[ShowClass]) -> Result<Vec<DressageTest>>;

    async fn judges_for_classes(&self, class_ids: &[i32]) -> Result<Vec<Judge>>;

    async fn class_entries(&self, class_id: i32) -> Result<Vec<ClassEntry>>;
}

/// Persistence of confirmed schedules, one per show and date
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// True when a ring of one of the show's schedules is dated `date`
    async fn schedule_exists(&self, show_id: i32, date: &str) -> Result<bool>;

    /// Atomically replace the schedule of the show for `date`; returns the new schedule id
    async fn replace_schedule(&self, show_id: i32, date: &str, plan: &SchedulePlan) -> Result<i32>;

    async fn load_schedule(&self, show_id: i32, date: &str) -> Result<Option<SchedulePlan>>;

    /// Classes placed in any persisted schedule of the show, whatever the date
    async fn scheduled_class_refs(&self, show_id: i32) -> Result<Vec<ScheduledClassRef>>;
}
