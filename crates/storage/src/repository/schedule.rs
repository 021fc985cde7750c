use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};

use super::ScheduleStore;
use crate::dto::schedule::{HorseRef, ScheduledRider};
use crate::error::{Result, StorageError};
use crate::models::{
    ClassPlan, ClassScheduleRow, JudgeScheduleRow, JudgeSlot, RiderScheduleRow, RingPlan,
    RingScheduleRow, RosterEntry, ScheduleRecord, ScheduledClassRef, SchedulePlan,
};

/// Repository for confirmed schedules
pub struct ScheduleRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScheduleRepository<'a> {
    /// Create a new ScheduleRepository
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    async fn find_for_date(&self, show_id: i32, date: &str) -> Result<Option<ScheduleRecord>> {
        let record = sqlx::query_as::<_, ScheduleRecord>(
            r#"
            SELECT s.id, s.show_id, s.schedule_date, s.created_at
            FROM schedules s
            WHERE s.show_id = $1
              AND EXISTS (
                  SELECT 1 FROM ring_schedules r
                  WHERE r.schedule_id = s.id AND r.date = $2
              )
            ORDER BY s.created_at DESC, s.id DESC
            LIMIT 1
            "#,
        )
        .bind(show_id)
        .bind(date)
        .fetch_optional(self.pool)
        .await?;

        Ok(record)
    }
}

#[async_trait]
impl<'a> ScheduleStore for ScheduleRepository<'a> {
    async fn schedule_exists(&self, show_id: i32, date: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM ring_schedules r
                INNER JOIN schedules s ON s.id = r.schedule_id
                WHERE s.show_id = $1 AND r.date = $2
            )
            "#,
        )
        .bind(show_id)
        .bind(date)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    async fn replace_schedule(&self, show_id: i32, date: &str, plan: &SchedulePlan) -> Result<i32> {
        let mut tx = self.pool.begin().await?;

        // Serialises concurrent confirmations for the same show
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(i64::from(show_id))
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            DELETE FROM schedules s
            WHERE s.show_id = $1
              AND (
                  s.schedule_date = $2
                  OR EXISTS (
                      SELECT 1 FROM ring_schedules r
                      WHERE r.schedule_id = s.id AND r.date = $2
                  )
              )
            "#,
        )
        .bind(show_id)
        .bind(date)
        .execute(&mut *tx)
        .await?;

        let schedule = sqlx::query_as::<_, ScheduleRecord>(
            r#"
            INSERT INTO schedules (show_id, schedule_date)
            VALUES ($1, $2)
            RETURNING id, show_id, schedule_date, created_at
            "#,
        )
        .bind(show_id)
        .bind(date)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            let error = StorageError::from(e);
            if error.is_foreign_key_violation() {
                StorageError::NotFound
            } else if error.is_unique_violation() {
                StorageError::ConstraintViolation(
                    "A schedule already exists for this date".to_string(),
                )
            } else {
                error
            }
        })?;

        for ring in &plan.rings {
            insert_ring(&mut tx, schedule.id, ring).await?;
        }

        tx.commit().await?;

        Ok(schedule.id)
    }

    async fn load_schedule(&self, show_id: i32, date: &str) -> Result<Option<SchedulePlan>> {
        let Some(schedule) = self.find_for_date(show_id, date).await? else {
            return Ok(None);
        };

        let rings = sqlx::query_as::<_, RingScheduleRow>(
            r#"
            SELECT id, schedule_id, name, start_time, date
            FROM ring_schedules
            WHERE schedule_id = $1
            ORDER BY id
            "#,
        )
        .bind(schedule.id)
        .fetch_all(self.pool)
        .await?;

        let ring_ids: Vec<i32> = rings.iter().map(|ring| ring.id).collect();
        let classes = sqlx::query_as::<_, ClassScheduleRow>(
            r#"
            SELECT id, ring_schedule_id, class_id, number, name, duration_minute, test
            FROM class_schedules
            WHERE ring_schedule_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(&ring_ids)
        .fetch_all(self.pool)
        .await?;

        let class_ids: Vec<i32> = classes.iter().map(|class| class.id).collect();
        let riders = sqlx::query_as::<_, RiderScheduleRow>(
            r#"
            SELECT id, class_schedule_id, rider_id, name, time_start,
                   rider_entry_number, horse_id, horse_name
            FROM rider_schedules
            WHERE class_schedule_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(&class_ids)
        .fetch_all(self.pool)
        .await?;

        let judges = sqlx::query_as::<_, JudgeScheduleRow>(
            r#"
            SELECT id, class_schedule_id, name, position
            FROM judge_schedules
            WHERE class_schedule_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(&class_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(Some(rebuild_plan(rings, classes, riders, judges)))
    }

    async fn scheduled_class_refs(&self, show_id: i32) -> Result<Vec<ScheduledClassRef>> {
        let refs = sqlx::query_as::<_, ScheduledClassRef>(
            r#"
            SELECT cs.class_id, cs.number
            FROM class_schedules cs
            INNER JOIN ring_schedules r ON r.id = cs.ring_schedule_id
            INNER JOIN schedules s ON s.id = r.schedule_id
            WHERE s.show_id = $1
            "#,
        )
        .bind(show_id)
        .fetch_all(self.pool)
        .await?;

        Ok(refs)
    }
}

async fn insert_ring(
    tx: &mut Transaction<'_, Postgres>,
    schedule_id: i32,
    ring: &RingPlan,
) -> Result<()> {
    let ring_id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO ring_schedules (schedule_id, name, start_time, date)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(schedule_id)
    .bind(&ring.name)
    .bind(&ring.start_time)
    .bind(&ring.date)
    .fetch_one(&mut **tx)
    .await?;

    for class in &ring.classes {
        insert_class(tx, ring_id, class).await?;
    }

    Ok(())
}

async fn insert_class(
    tx: &mut Transaction<'_, Postgres>,
    ring_id: i32,
    class: &ClassPlan,
) -> Result<()> {
    let class_schedule_id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO class_schedules (ring_schedule_id, class_id, number, name, duration_minute, test)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(ring_id)
    .bind(class.class_id)
    .bind(&class.number)
    .bind(&class.name)
    .bind(class.duration_minute)
    .bind(&class.test)
    .fetch_one(&mut **tx)
    .await?;

    if !class.entries.is_empty() {
        let mut query = QueryBuilder::<Postgres>::new(
            "INSERT INTO rider_schedules (class_schedule_id, rider_id, name, time_start, rider_entry_number, horse_id, horse_name) ",
        );
        query.push_values(&class.entries, |mut row, entry| {
            let rider = ScheduledRider::from(entry.clone());
            row.push_bind(class_schedule_id)
                .push_bind(rider.id)
                .push_bind(rider.name)
                .push_bind(rider.time_start)
                .push_bind(rider.rider_entry_number)
                .push_bind(rider.horse.id)
                .push_bind(rider.horse.name);
        });
        query.build().execute(&mut **tx).await?;
    }

    if !class.judges.is_empty() {
        let mut query = QueryBuilder::<Postgres>::new(
            "INSERT INTO judge_schedules (class_schedule_id, name, position) ",
        );
        query.push_values(&class.judges, |mut row, judge| {
            row.push_bind(class_schedule_id)
                .push_bind(&judge.name)
                .push_bind(&judge.position);
        });
        query.build().execute(&mut **tx).await?;
    }

    Ok(())
}

fn rebuild_plan(
    rings: Vec<RingScheduleRow>,
    classes: Vec<ClassScheduleRow>,
    riders: Vec<RiderScheduleRow>,
    judges: Vec<JudgeScheduleRow>,
) -> SchedulePlan {
    let mut riders_by_class: HashMap<i32, Vec<RosterEntry>> = HashMap::new();
    for row in riders {
        let entry = RosterEntry::from(ScheduledRider {
            id: row.rider_id,
            name: row.name,
            time_start: row.time_start,
            rider_entry_number: row.rider_entry_number,
            horse: HorseRef {
                id: row.horse_id,
                name: row.horse_name,
            },
        });
        riders_by_class
            .entry(row.class_schedule_id)
            .or_default()
            .push(entry);
    }

    let mut judges_by_class: HashMap<i32, Vec<JudgeSlot>> = HashMap::new();
    for row in judges {
        judges_by_class
            .entry(row.class_schedule_id)
            .or_default()
            .push(JudgeSlot {
                name: row.name,
                position: row.position,
            });
    }

    let mut classes_by_ring: HashMap<i32, Vec<ClassPlan>> = HashMap::new();
    for row in classes {
        classes_by_ring
            .entry(row.ring_schedule_id)
            .or_default()
            .push(ClassPlan {
                class_id: row.class_id,
                number: row.number,
                name: row.name,
                duration_minute: row.duration_minute,
                test: row.test,
                entries: riders_by_class.remove(&row.id).unwrap_or_default(),
                judges: judges_by_class.remove(&row.id).unwrap_or_default(),
            });
    }

    let rings = rings
        .into_iter()
        .map(|row| RingPlan {
            classes: classes_by_ring.remove(&row.id).unwrap_or_default(),
            name: row.name,
            start_time: row.start_time,
            date: row.date,
        })
        .collect();

    SchedulePlan { rings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BREAK_NAME;

    #[test]
    fn test_rebuild_plan_groups_rows() {
        let rings = vec![
            RingScheduleRow {
                id: 1,
                schedule_id: 1,
                name: "Main".to_string(),
                start_time: "08:00".to_string(),
                date: "2025-06-01".to_string(),
            },
            RingScheduleRow {
                id: 2,
                schedule_id: 1,
                name: "Annex".to_string(),
                start_time: "08:30".to_string(),
                date: "2025-06-01".to_string(),
            },
        ];
        let classes = vec![ClassScheduleRow {
            id: 10,
            ring_schedule_id: 2,
            class_id: Some(3),
            number: "3".to_string(),
            name: "Training".to_string(),
            duration_minute: 7,
            test: "Training(A)".to_string(),
        }];
        let riders = vec![
            RiderScheduleRow {
                id: 100,
                class_schedule_id: 10,
                rider_id: 4,
                name: "Jane Doe".to_string(),
                time_start: "08:30".to_string(),
                rider_entry_number: 12,
                horse_id: 5,
                horse_name: "Apollo".to_string(),
            },
            RiderScheduleRow {
                id: 101,
                class_schedule_id: 10,
                rider_id: -1,
                name: BREAK_NAME.to_string(),
                time_start: "08:37".to_string(),
                rider_entry_number: 0,
                horse_id: -1,
                horse_name: BREAK_NAME.to_string(),
            },
        ];
        let judges = vec![JudgeScheduleRow {
            id: 1000,
            class_schedule_id: 10,
            name: "Marie Tremblay".to_string(),
            position: "C".to_string(),
        }];

        let plan = rebuild_plan(rings, classes, riders, judges);

        assert_eq!(plan.rings.len(), 2);
        assert!(plan.rings[0].classes.is_empty());
        let class = &plan.rings[1].classes[0];
        assert_eq!(class.class_id, Some(3));
        assert_eq!(class.entries.len(), 2);
        assert!(matches!(class.entries[1], RosterEntry::Break(_)));
        assert_eq!(class.judges[0].position, "C");
    }

    #[test]
    fn test_class_rows_are_removed_with_their_class() {
        let schema = include_str!("../../migrations/20250601000000_initial_schema.sql");

        assert!(schema.contains("class_id INTEGER REFERENCES classes(id) ON DELETE CASCADE"));
        assert!(!schema.contains("ON DELETE SET NULL"));
    }
}
