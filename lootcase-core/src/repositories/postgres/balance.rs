// File: lootcase-core/src/repositories/postgres/balance.rs

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;
use lootcase_common::error::Error;
use lootcase_common::traits::repository_traits::BalanceRepository;

pub struct PostgresBalanceRepository {
    pub pool: Pool<Postgres>,
}

impl PostgresBalanceRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BalanceRepository for PostgresBalanceRepository {
    async fn open_account(&self, subject_id: Uuid, initial: i64) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO balances (subject_id, balance)
            VALUES ($1, $2)
            ON CONFLICT (subject_id) DO NOTHING
            "#,
        )
            .bind(subject_id)
            .bind(initial)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get_balance(&self, subject_id: Uuid) -> Result<i64, Error> {
        let row_opt = sqlx::query(
            r#"
            SELECT balance
            FROM balances
            WHERE subject_id = $1
            "#,
        )
            .bind(subject_id)
            .fetch_optional(&self.pool)
            .await?;

        match row_opt {
            Some(r) => Ok(r.try_get("balance")?),
            None => Err(Error::UnknownSubject(subject_id)),
        }
    }

    async fn apply_balance_delta(&self, subject_id: Uuid, delta: i64) -> Result<i64, Error> {
        let row_opt = sqlx::query(
            r#"
            UPDATE balances
            SET balance = balance + $2,
                updated_at = now()
            WHERE subject_id = $1
            RETURNING balance
            "#,
        )
            .bind(subject_id)
            .bind(delta)
            .fetch_optional(&self.pool)
            .await?;

        match row_opt {
            Some(r) => Ok(r.try_get("balance")?),
            None => Err(Error::UnknownSubject(subject_id)),
        }
    }
}
