//! Repository layer for database operations
//!
//! Services only see the [`LaptopStore`] and [`StudentLaptopStore`] traits.
//! Unique-constraint violations are translated into [`AppError::Conflict`]
//! here, so that the store stays the only arbiter of concurrent writes.
//!
//! [`AppError::Conflict`]: crate::error::AppError::Conflict

pub mod laptops;
#[cfg(test)]
pub mod memory;
pub mod student_laptops;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        Laptop, LaptopFilter, NewLaptop, NewStudentLaptop, PageRequest, StudentFilter,
        StudentLaptop,
    },
};

/// Persistence of inventoried laptops
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LaptopStore: Send + Sync {
    /// Insert a laptop with a fresh id and timestamp
    async fn insert(&self, laptop: &NewLaptop) -> AppResult<Laptop>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Laptop>>;

    async fn find_by_elcot_number(&self, elcot_number: &str) -> AppResult<Option<Laptop>>;

    /// Matching laptops, newest first. `None` returns every match.
    async fn find_many(
        &self,
        filter: &LaptopFilter,
        page: Option<PageRequest>,
    ) -> AppResult<Vec<Laptop>>;

    async fn count(&self, filter: &LaptopFilter) -> AppResult<i64>;

    /// Returns false when no row had that id
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Persistence of student assignments
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentLaptopStore: Send + Sync {
    async fn insert(&self, assignment: &NewStudentLaptop) -> AppResult<StudentLaptop>;

    async fn find_by_elcot_number(&self, elcot_number: &str)
        -> AppResult<Option<StudentLaptop>>;

    /// Matching assignments, newest first. `None` returns every match.
    async fn find_many(
        &self,
        filter: &StudentFilter,
        page: Option<PageRequest>,
    ) -> AppResult<Vec<StudentLaptop>>;

    async fn count(&self, filter: &StudentFilter) -> AppResult<i64>;
}

/// Main repository struct holding the stores
#[derive(Clone)]
pub struct Repository {
    pub laptops: Arc<dyn LaptopStore>,
    pub students: Arc<dyn StudentLaptopStore>,
}

impl Repository {
    /// Create a PostgreSQL-backed repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            laptops: Arc::new(laptops::LaptopsRepository::new(pool.clone())),
            students: Arc::new(student_laptops::StudentLaptopsRepository::new(pool)),
        }
    }

    pub fn from_stores(
        laptops: Arc<dyn LaptopStore>,
        students: Arc<dyn StudentLaptopStore>,
    ) -> Self {
        Self { laptops, students }
    }
}

/// Name of the unique constraint a failed write tripped over, if any
pub(crate) fn unique_violation(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            Some(db.constraint().unwrap_or_default().to_string())
        }
        _ => None,
    }
}
