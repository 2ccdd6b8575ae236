//! Laptops repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::{unique_violation, LaptopStore};
use crate::{
    error::AppResult,
    models::{
        laptop::LaptopField,
        pagination::contains_pattern,
        Laptop, LaptopFilter, NewLaptop, PageRequest,
    },
};

const SERIAL_NUMBER_KEY: &str = "laptops_serial_number_key";
const ELCOT_NUMBER_KEY: &str = "laptops_elcot_number_key";

const COLUMNS: &str = "id, serial_number, elcot_number, created_at";

#[derive(Clone)]
pub struct LaptopsRepository {
    pool: Pool<Postgres>,
}

impl LaptopsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn where_clause(filter: &LaptopFilter) -> &'static str {
        if filter.search.is_some() {
            "WHERE serial_number ILIKE $1 OR elcot_number ILIKE $1"
        } else {
            ""
        }
    }
}

#[async_trait]
impl LaptopStore for LaptopsRepository {
    async fn insert(&self, laptop: &NewLaptop) -> AppResult<Laptop> {
        let query = format!(
            "INSERT INTO laptops ({COLUMNS}) VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
        );

        sqlx::query_as::<_, Laptop>(&query)
            .bind(Uuid::new_v4())
            .bind(&laptop.serial_number)
            .bind(&laptop.elcot_number)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match unique_violation(&e).as_deref() {
                Some(SERIAL_NUMBER_KEY) => LaptopField::SerialNumber.conflict(),
                Some(ELCOT_NUMBER_KEY) => LaptopField::ElcotNumber.conflict(),
                _ => e.into(),
            })
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Laptop>> {
        let query = format!("SELECT {COLUMNS} FROM laptops WHERE id = $1");
        let row = sqlx::query_as::<_, Laptop>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_elcot_number(&self, elcot_number: &str) -> AppResult<Option<Laptop>> {
        let query = format!("SELECT {COLUMNS} FROM laptops WHERE elcot_number = $1");
        let row = sqlx::query_as::<_, Laptop>(&query)
            .bind(elcot_number)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_many(
        &self,
        filter: &LaptopFilter,
        page: Option<PageRequest>,
    ) -> AppResult<Vec<Laptop>> {
        let mut query = format!(
            "SELECT {COLUMNS} FROM laptops {} ORDER BY created_at DESC, id DESC",
            Self::where_clause(filter)
        );
        if page.is_some() {
            let idx = if filter.search.is_some() { 2 } else { 1 };
            query.push_str(&format!(" LIMIT ${} OFFSET ${}", idx, idx + 1));
        }

        let mut builder = sqlx::query_as::<_, Laptop>(&query);
        if let Some(ref search) = filter.search {
            builder = builder.bind(contains_pattern(search));
        }
        if let Some(page) = page {
            builder = builder.bind(page.limit).bind(page.offset());
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn count(&self, filter: &LaptopFilter) -> AppResult<i64> {
        let query = format!("SELECT COUNT(*) FROM laptops {}", Self::where_clause(filter));

        let mut builder = sqlx::query_scalar::<_, i64>(&query);
        if let Some(ref search) = filter.search {
            builder = builder.bind(contains_pattern(search));
        }

        let total = builder.fetch_one(&self.pool).await?;
        Ok(total)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM laptops WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
