// File: lootcase-core/src/repositories/postgres/catalog.rs

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{Executor, Pool, Postgres, Row};
use lootcase_common::error::Error;
use lootcase_common::models::{LootCase, Prize, PrizeImage};
use lootcase_common::traits::repository_traits::CatalogRepository;

const PRIZE_COLUMNS: &str = r#"
    p.prize_id,
    p.name,
    p.description,
    p.image,
    p.image_kind,
    p.rarity,
    p.color,
    p.value,
    p.drop_chance,
    p.kind
"#;

const CASE_COLUMNS: &str = r#"
    case_id,
    name,
    description,
    image,
    image_kind,
    rarity,
    color,
    price,
    cooldown_secs,
    is_active,
    glow_color,
    glow_intensity
"#;

pub struct PostgresCatalogRepository {
    pub pool: Pool<Postgres>,
}

impl PostgresCatalogRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Prize lists for the given cases (or every case), in stored order.
    async fn load_case_prizes(&self, case_id: Option<&str>) -> Result<HashMap<String, Vec<Prize>>, Error> {
        let sql = format!(
            r#"
            SELECT cp.case_id, {PRIZE_COLUMNS}
            FROM case_prizes cp
            JOIN prizes p ON p.prize_id = cp.prize_id
            WHERE ($1::TEXT IS NULL OR cp.case_id = $1)
            ORDER BY cp.case_id, cp.position
            "#
        );
        let rows = sqlx::query(&sql)
            .bind(case_id)
            .fetch_all(&self.pool)
            .await?;

        let mut by_case: HashMap<String, Vec<Prize>> = HashMap::new();
        for r in rows {
            let owner: String = r.try_get("case_id")?;
            by_case.entry(owner).or_default().push(prize_from_row(&r)?);
        }
        Ok(by_case)
    }
}

fn prize_from_row(r: &PgRow) -> Result<Prize, Error> {
    let image: String = r.try_get("image")?;
    let image_kind: String = r.try_get("image_kind")?;
    let rarity: String = r.try_get("rarity")?;
    let kind: String = r.try_get("kind")?;
    Ok(Prize {
        id: r.try_get("prize_id")?,
        name: r.try_get("name")?,
        description: r.try_get("description")?,
        image: PrizeImage::from_stored(&image_kind, &image)?,
        rarity: rarity.parse()?,
        color: r.try_get("color")?,
        value: r.try_get("value")?,
        drop_chance: r.try_get("drop_chance")?,
        kind: kind.parse()?,
    })
}

fn case_from_row(r: &PgRow, prizes: Vec<Prize>) -> Result<LootCase, Error> {
    let image: String = r.try_get("image")?;
    let image_kind: String = r.try_get("image_kind")?;
    let rarity: String = r.try_get("rarity")?;
    let glow: String = r.try_get("glow_intensity")?;
    Ok(LootCase {
        id: r.try_get("case_id")?,
        name: r.try_get("name")?,
        description: r.try_get("description")?,
        image: PrizeImage::from_stored(&image_kind, &image)?,
        rarity: rarity.parse()?,
        color: r.try_get("color")?,
        price: r.try_get("price")?,
        cooldown_secs: r.try_get("cooldown_secs")?,
        prizes,
        is_active: r.try_get("is_active")?,
        glow_color: r.try_get("glow_color")?,
        glow_intensity: glow.parse()?,
    })
}

async fn upsert_prize_row<'e, E>(executor: E, prize: &Prize) -> Result<(), Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        r#"
        INSERT INTO prizes (
            prize_id,
            name,
            description,
            image,
            image_kind,
            rarity,
            color,
            value,
            drop_chance,
            kind,
            updated_at
        )
        VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10, now())
        ON CONFLICT (prize_id) DO UPDATE SET
            name = EXCLUDED.name,
            description = EXCLUDED.description,
            image = EXCLUDED.image,
            image_kind = EXCLUDED.image_kind,
            rarity = EXCLUDED.rarity,
            color = EXCLUDED.color,
            value = EXCLUDED.value,
            drop_chance = EXCLUDED.drop_chance,
            kind = EXCLUDED.kind,
            updated_at = now()
        "#,
    )
        .bind(&prize.id)
        .bind(&prize.name)
        .bind(&prize.description)
        .bind(prize.image.to_source_string())
        .bind(prize.image.kind_str())
        .bind(prize.rarity.as_str())
        .bind(&prize.color)
        .bind(prize.value)
        .bind(prize.drop_chance)
        .bind(prize.kind.as_str())
        .execute(executor)
        .await?;

    Ok(())
}

#[async_trait]
impl CatalogRepository for PostgresCatalogRepository {
    async fn list_prizes(&self) -> Result<Vec<Prize>, Error> {
        let sql = format!("SELECT {PRIZE_COLUMNS} FROM prizes p ORDER BY p.prize_id ASC");
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await?;

        let mut list = Vec::with_capacity(rows.len());
        for r in rows {
            list.push(prize_from_row(&r)?);
        }
        Ok(list)
    }

    async fn get_prize(&self, prize_id: &str) -> Result<Option<Prize>, Error> {
        let sql = format!("SELECT {PRIZE_COLUMNS} FROM prizes p WHERE p.prize_id = $1");
        let row_opt = sqlx::query(&sql)
            .bind(prize_id)
            .fetch_optional(&self.pool)
            .await?;

        match row_opt {
            Some(r) => Ok(Some(prize_from_row(&r)?)),
            None => Ok(None),
        }
    }

    async fn upsert_prize(&self, prize: &Prize) -> Result<(), Error> {
        upsert_prize_row(&self.pool, prize).await
    }

    async fn delete_prize(&self, prize_id: &str) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM prizes WHERE prize_id = $1")
            .bind(prize_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_cases(&self) -> Result<Vec<LootCase>, Error> {
        let sql = format!("SELECT {CASE_COLUMNS} FROM loot_cases ORDER BY created_at ASC, case_id ASC");
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await?;

        let mut prizes = self.load_case_prizes(None).await?;
        let mut list = Vec::with_capacity(rows.len());
        for r in rows {
            let case_id: String = r.try_get("case_id")?;
            let pool = prizes.remove(&case_id).unwrap_or_default();
            list.push(case_from_row(&r, pool)?);
        }
        Ok(list)
    }

    async fn get_case(&self, case_id: &str) -> Result<Option<LootCase>, Error> {
        let sql = format!("SELECT {CASE_COLUMNS} FROM loot_cases WHERE case_id = $1");
        let row_opt = sqlx::query(&sql)
            .bind(case_id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(r) = row_opt else {
            return Ok(None);
        };
        let pool = self
            .load_case_prizes(Some(case_id))
            .await?
            .remove(case_id)
            .unwrap_or_default();
        Ok(Some(case_from_row(&r, pool)?))
    }

    async fn upsert_case(&self, case: &LootCase) -> Result<(), Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO loot_cases (
                case_id,
                name,
                description,
                image,
                image_kind,
                rarity,
                color,
                price,
                cooldown_secs,
                is_active,
                glow_color,
                glow_intensity
            )
            VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12)
            ON CONFLICT (case_id) DO UPDATE SET
                name = EXCLUDED.name,
                description = EXCLUDED.description,
                image = EXCLUDED.image,
                image_kind = EXCLUDED.image_kind,
                rarity = EXCLUDED.rarity,
                color = EXCLUDED.color,
                price = EXCLUDED.price,
                cooldown_secs = EXCLUDED.cooldown_secs,
                is_active = EXCLUDED.is_active,
                glow_color = EXCLUDED.glow_color,
                glow_intensity = EXCLUDED.glow_intensity,
                updated_at = now()
            "#,
        )
            .bind(&case.id)
            .bind(&case.name)
            .bind(&case.description)
            .bind(case.image.to_source_string())
            .bind(case.image.kind_str())
            .bind(case.rarity.as_str())
            .bind(&case.color)
            .bind(case.price)
            .bind(case.cooldown_secs)
            .bind(case.is_active)
            .bind(&case.glow_color)
            .bind(case.glow_intensity.as_str())
            .execute(&mut *tx)
            .await?;

        for prize in &case.prizes {
            upsert_prize_row(&mut *tx, prize).await?;
        }

        sqlx::query("DELETE FROM case_prizes WHERE case_id = $1")
            .bind(&case.id)
            .execute(&mut *tx)
            .await?;

        for (position, prize) in case.prizes.iter().enumerate() {
            sqlx::query(
                "INSERT INTO case_prizes (case_id, prize_id, position) VALUES ($1, $2, $3)"
            )
                .bind(&case.id)
                .bind(&prize.id)
                .bind(position as i32)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete_case(&self, case_id: &str) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM loot_cases WHERE case_id = $1")
            .bind(case_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_case_active(&self, case_id: &str, active: bool) -> Result<bool, Error> {
        let result = sqlx::query(
            "UPDATE loot_cases SET is_active = $2, updated_at = now() WHERE case_id = $1"
        )
            .bind(case_id)
            .bind(active)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
