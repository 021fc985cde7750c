//! In-memory data providers for exercising the scheduling services without a database.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::{Result, StorageError};
use crate::models::{
    ClassEntry, DressageTest, Inscription, Judge, ScheduledClassRef, SchedulePlan, Show, ShowClass,
};
use crate::repository::{ScheduleStore, ShowDataProvider};

struct StoredSchedule {
    id: i32,
    show_id: i32,
    date: String,
    plan: SchedulePlan,
}

impl StoredSchedule {
    fn covers(&self, show_id: i32, date: &str) -> bool {
        self.show_id == show_id
            && (self.date == date || self.plan.rings.iter().any(|ring| ring.date == date))
    }
}

#[derive(Default)]
pub(crate) struct MemoryBackend {
    shows: Vec<Show>,
    classes: Vec<ShowClass>,
    tests: Vec<DressageTest>,
    judges: Vec<Judge>,
    inscriptions: Vec<Inscription>,
    entries: HashMap<i32, Vec<ClassEntry>>,
    schedules: Mutex<Vec<StoredSchedule>>,
    fail_writes: bool,
}

impl MemoryBackend {
    /// Show 7 with two rings. Horse 5 is shared inside class 2, class 3 has no entries.
    pub(crate) fn sample() -> Self {
        let date = |day| NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
        let show = Show {
            id: 7,
            name: "Spring Dressage".to_string(),
            start_date: date(1),
            end_date: date(2),
            created_at: date(1).and_hms_opt(0, 0, 0).unwrap(),
        };

        let class = |id: i32, ring_name: &str, ring_number: i32| ShowClass {
            id,
            show_id: 7,
            test_id: 1,
            number: id.to_string(),
            name: format!("Class {}", id),
            ring_name: ring_name.to_string(),
            ring_number,
        };

        let entry = |inscription_id, rider_id, rider: &str, horse_id, horse: &str| ClassEntry {
            inscription_id,
            rider_id,
            rider_name: rider.to_string(),
            horse_id,
            horse_name: horse.to_string(),
            rider_entry_number: inscription_id,
        };

        let inscription = |id, class_id, horse_id, rider_id| Inscription {
            id,
            horse_id,
            rider_id,
            class_id,
            rider_entry_number: id,
        };

        Self {
            shows: vec![show],
            classes: vec![class(1, "Main", 1), class(2, "Main", 1), class(3, "Annex", 2)],
            tests: vec![DressageTest {
                id: 1,
                name: "Training Level Test A".to_string(),
                short_name: "Training(A)".to_string(),
                duration_minute: 7,
            }],
            judges: vec![
                Judge {
                    id: 1,
                    class_id: 1,
                    name: "Marie Tremblay".to_string(),
                    ring_position: "C".to_string(),
                },
                Judge {
                    id: 2,
                    class_id: 2,
                    name: "Paul Gagnon".to_string(),
                    ring_position: "E".to_string(),
                },
            ],
            inscriptions: vec![
                inscription(1, 2, 5, 10),
                inscription(2, 2, 5, 11),
                inscription(3, 1, 6, 12),
            ],
            entries: HashMap::from([
                (
                    2,
                    vec![
                        entry(1, 10, "Jane Doe", 5, "Apollo"),
                        entry(2, 11, "John Roe", 5, "Apollo"),
                    ],
                ),
                (1, vec![entry(3, 12, "Anne Roy", 6, "Comet")]),
            ]),
            ..Self::default()
        }
    }

    pub(crate) fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub(crate) fn schedule_count(&self) -> usize {
        self.schedules.lock().unwrap().len()
    }
}

#[async_trait]
impl ShowDataProvider for MemoryBackend {
    async fn find_show(&self, show_id: i32) -> Result<Show> {
        self.shows
            .iter()
            .find(|show| show.id == show_id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn inscriptions_by_show(&self, show_id: i32) -> Result<Vec<Inscription>> {
        let class_ids: Vec<i32> = self
            .classes
            .iter()
            .filter(|class| class.show_id == show_id)
            .map(|class| class.id)
            .collect();

        Ok(self
            .inscriptions
            .iter()
            .filter(|inscription| class_ids.contains(&inscription.class_id))
            .cloned()
            .collect())
    }

    async fn classes_in_show(&self, show_id: i32) -> Result<Vec<ShowClass>> {
        Ok(self
            .classes
            .iter()
            .filter(|class| class.show_id == show_id)
            .cloned()
            .collect())
    }

    async fn tests_for_classes(&self, classes: &[ShowClass]) -> Result<Vec<DressageTest>> {
        Ok(self
            .tests
            .iter()
            .filter(|test| classes.iter().any(|class| class.test_id == test.id))
            .cloned()
            .collect())
    }

    async fn judges_for_classes(&self, class_ids: &[i32]) -> Result<Vec<Judge>> {
        Ok(self
            .judges
            .iter()
            .filter(|judge| class_ids.contains(&judge.class_id))
            .cloned()
            .collect())
    }

    async fn class_entries(&self, class_id: i32) -> Result<Vec<ClassEntry>> {
        Ok(self.entries.get(&class_id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl ScheduleStore for MemoryBackend {
    async fn schedule_exists(&self, show_id: i32, date: &str) -> Result<bool> {
        let schedules = self.schedules.lock().unwrap();

        Ok(schedules.iter().any(|stored| {
            stored.show_id == show_id && stored.plan.rings.iter().any(|ring| ring.date == date)
        }))
    }

    async fn replace_schedule(&self, show_id: i32, date: &str, plan: &SchedulePlan) -> Result<i32> {
        if self.fail_writes {
            return Err(StorageError::Database(sqlx::Error::PoolTimedOut));
        }

        let mut schedules = self.schedules.lock().unwrap();
        schedules.retain(|stored| !stored.covers(show_id, date));

        let id = schedules.iter().map(|stored| stored.id).max().unwrap_or(0) + 1;
        schedules.push(StoredSchedule {
            id,
            show_id,
            date: date.to_string(),
            plan: plan.clone(),
        });

        Ok(id)
    }

    async fn load_schedule(&self, show_id: i32, date: &str) -> Result<Option<SchedulePlan>> {
        let schedules = self.schedules.lock().unwrap();

        Ok(schedules
            .iter()
            .rev()
            .find(|stored| {
                stored.show_id == show_id && stored.plan.rings.iter().any(|ring| ring.date == date)
            })
            .map(|stored| stored.plan.clone()))
    }

    async fn scheduled_class_refs(&self, show_id: i32) -> Result<Vec<ScheduledClassRef>> {
        let schedules = self.schedules.lock().unwrap();

        Ok(schedules
            .iter()
            .filter(|stored| stored.show_id == show_id)
            .flat_map(|stored| stored.plan.rings.iter())
            .flat_map(|ring| ring.classes.iter())
            .map(|class| ScheduledClassRef {
                class_id: class.class_id,
                number: class.number.clone(),
            })
            .collect())
    }
}
