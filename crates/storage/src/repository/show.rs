use async_trait::async_trait;
use sqlx::PgPool;

use super::ShowDataProvider;
use crate::error::{Result, StorageError};
use crate::models::{ClassEntry, DressageTest, Inscription, Judge, Show, ShowClass};

/// Repository for the show data read by the scheduler
pub struct ShowRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShowRepository<'a> {
    /// Create a new ShowRepository
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl<'a> ShowDataProvider for ShowRepository<'a> {
    async fn find_show(&self, show_id: i32) -> Result<Show> {
        let show = sqlx::query_as::<_, Show>(
            r#"
            SELECT id, name, start_date, end_date, created_at
            FROM shows
            WHERE id = $1
            "#,
        )
        .bind(show_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(show)
    }

    async fn inscriptions_by_show(&self, show_id: i32) -> Result<Vec<Inscription>> {
        // An inscription is tied to a single class; keep the first link if several exist
        let inscriptions = sqlx::query_as::<_, Inscription>(
            r#"
            SELECT DISTINCT ON (i.id)
                i.id, i.horse_id, i.rider_id, ci.class_id, i.rider_entry_number
            FROM inscriptions i
            INNER JOIN class_inscriptions ci ON ci.inscription_id = i.id
            WHERE i.show_id = $1
            ORDER BY i.id, ci.class_id
            "#,
        )
        .bind(show_id)
        .fetch_all(self.pool)
        .await?;

        Ok(inscriptions)
    }

    async fn classes_in_show(&self, show_id: i32) -> Result<Vec<ShowClass>> {
        let classes = sqlx::query_as::<_, ShowClass>(
            r#"
            SELECT id, show_id, test_id, number, name, ring_name, ring_number
            FROM classes
            WHERE show_id = $1
            ORDER BY id
            "#,
        )
        .bind(show_id)
        .fetch_all(self.pool)
        .await?;

        Ok(classes)
    }

    async fn tests_for_classes(&self, classes: &[ShowClass]) -> Result<Vec<DressageTest>> {
        let mut test_ids: Vec<i32> = classes.iter().map(|class| class.test_id).collect();
        test_ids.sort_unstable();
        test_ids.dedup();

        if test_ids.is_empty() {
            return Ok(Vec::new());
        }

        let tests = sqlx::query_as::<_, DressageTest>(
            r#"
            SELECT id, name, short_name, duration_minute
            FROM tests
            WHERE id = ANY($1)
            "#,
        )
        .bind(&test_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(tests)
    }

    async fn judges_for_classes(&self, class_ids: &[i32]) -> Result<Vec<Judge>> {
        if class_ids.is_empty() {
            return Ok(Vec::new());
        }

        let judges = sqlx::query_as::<_, Judge>(
            r#"
            SELECT id, class_id, name, ring_position
            FROM judges
            WHERE class_id = ANY($1)
            ORDER BY class_id, id
            "#,
        )
        .bind(class_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(judges)
    }

    async fn class_entries(&self, class_id: i32) -> Result<Vec<ClassEntry>> {
        let entries = sqlx::query_as::<_, ClassEntry>(
            r#"
            SELECT
                i.id AS inscription_id,
                r.id AS rider_id,
                r.name AS rider_name,
                h.id AS horse_id,
                h.name AS horse_name,
                i.rider_entry_number
            FROM class_inscriptions ci
            INNER JOIN inscriptions i ON i.id = ci.inscription_id
            INNER JOIN riders r ON r.id = i.rider_id
            INNER JOIN horses h ON h.id = i.horse_id
            WHERE ci.class_id = $1
            ORDER BY i.rider_entry_number, i.id
            "#,
        )
        .bind(class_id)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }
}
