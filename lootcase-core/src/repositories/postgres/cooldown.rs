// File: lootcase-core/src/repositories/postgres/cooldown.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;
use lootcase_common::error::Error;
use lootcase_common::models::CooldownKey;
use lootcase_common::traits::repository_traits::CooldownRepository;

pub struct PostgresCooldownRepository {
    pub pool: Pool<Postgres>,
}

impl PostgresCooldownRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CooldownRepository for PostgresCooldownRepository {
    async fn get_last_opened(
        &self,
        subject_id: Uuid,
        key: &CooldownKey,
    ) -> Result<Option<DateTime<Utc>>, Error> {
        let row_opt = sqlx::query(
            r#"
            SELECT last_opened_at
            FROM cooldowns
            WHERE subject_id = $1
              AND cooldown_key = $2
            "#,
        )
            .bind(subject_id)
            .bind(key.as_key())
            .fetch_optional(&self.pool)
            .await?;

        match row_opt {
            Some(r) => Ok(Some(r.try_get("last_opened_at")?)),
            None => Ok(None),
        }
    }

    async fn set_last_opened(
        &self,
        subject_id: Uuid,
        key: &CooldownKey,
        at: DateTime<Utc>,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO cooldowns (subject_id, cooldown_key, last_opened_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (subject_id, cooldown_key)
            DO UPDATE SET last_opened_at = EXCLUDED.last_opened_at
            "#,
        )
            .bind(subject_id)
            .bind(key.as_key())
            .bind(at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
