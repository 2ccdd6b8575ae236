//! Student laptop assignments repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::{unique_violation, StudentLaptopStore};
use crate::{
    error::{AppError, AppResult},
    models::{
        pagination::contains_pattern, NewStudentLaptop, PageRequest, StudentFilter,
        StudentLaptop,
    },
};

const ELCOT_NUMBER_KEY: &str = "student_laptops_elcot_number_key";

const SELECT: &str = r#"
    SELECT s.id, s.elcot_number, s.student_name, s.department, s.year, s.created_at,
           EXISTS (SELECT 1 FROM laptops l WHERE l.elcot_number = s.elcot_number) AS in_inventory
    FROM student_laptops s
"#;

#[derive(Clone)]
pub struct StudentLaptopsRepository {
    pool: Pool<Postgres>,
}

impl StudentLaptopsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// WHERE clause for the filter and the index of the next free parameter
    fn where_clause(filter: &StudentFilter) -> (String, usize) {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if filter.search.is_some() {
            conditions.push(format!(
                "(s.elcot_number ILIKE ${idx} OR s.student_name ILIKE ${idx})"
            ));
            idx += 1;
        }
        if filter.department.is_some() {
            conditions.push(format!("s.department = ${idx}"));
            idx += 1;
        }

        let clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        (clause, idx)
    }
}

#[async_trait]
impl StudentLaptopStore for StudentLaptopsRepository {
    async fn insert(&self, assignment: &NewStudentLaptop) -> AppResult<StudentLaptop> {
        sqlx::query_as::<_, StudentLaptop>(
            r#"
            INSERT INTO student_laptops (id, elcot_number, student_name, department, year, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, elcot_number, student_name, department, year, created_at,
                      EXISTS (SELECT 1 FROM laptops l WHERE l.elcot_number = $2) AS in_inventory
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&assignment.elcot_number)
        .bind(&assignment.student_name)
        .bind(&assignment.department)
        .bind(&assignment.year)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match unique_violation(&e).as_deref() {
            Some(ELCOT_NUMBER_KEY) => AppError::Conflict(
                "This ELCOT number is already assigned to a student".to_string(),
            ),
            _ => e.into(),
        })
    }

    async fn find_by_elcot_number(
        &self,
        elcot_number: &str,
    ) -> AppResult<Option<StudentLaptop>> {
        let query = format!("{SELECT} WHERE s.elcot_number = $1");
        let row = sqlx::query_as::<_, StudentLaptop>(&query)
            .bind(elcot_number)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_many(
        &self,
        filter: &StudentFilter,
        page: Option<PageRequest>,
    ) -> AppResult<Vec<StudentLaptop>> {
        let (where_clause, idx) = Self::where_clause(filter);
        let mut query = format!("{SELECT} {where_clause} ORDER BY s.created_at DESC, s.id DESC");
        if page.is_some() {
            query.push_str(&format!(" LIMIT ${} OFFSET ${}", idx, idx + 1));
        }

        let mut builder = sqlx::query_as::<_, StudentLaptop>(&query);
        if let Some(ref search) = filter.search {
            builder = builder.bind(contains_pattern(search));
        }
        if let Some(ref department) = filter.department {
            builder = builder.bind(department);
        }
        if let Some(page) = page {
            builder = builder.bind(page.limit).bind(page.offset());
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn count(&self, filter: &StudentFilter) -> AppResult<i64> {
        let (where_clause, _) = Self::where_clause(filter);
        let query = format!("SELECT COUNT(*) FROM student_laptops s {where_clause}");

        let mut builder = sqlx::query_scalar::<_, i64>(&query);
        if let Some(ref search) = filter.search {
            builder = builder.bind(contains_pattern(search));
        }
        if let Some(ref department) = filter.department {
            builder = builder.bind(department);
        }

        let total = builder.fetch_one(&self.pool).await?;
        Ok(total)
    }
}
