//! Laptop inventory service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        laptop::{LaptopQuery, RegisterLaptop},
        pagination::normalize_filter,
        Laptop, LaptopFilter, Page, PageRequest, Pagination, StudentLaptop,
    },
    repository::Repository,
    services::export::{self, Report},
};

/// Result of removing a laptop from inventory
#[derive(Debug, Clone)]
pub struct DeletedLaptop {
    pub laptop: Laptop,
    /// Assignment left pointing at the removed ELCOT number, if any
    pub orphaned_assignment: Option<StudentLaptop>,
}

#[derive(Clone)]
pub struct InventoryService {
    repository: Repository,
    max_limit: i64,
}

impl InventoryService {
    pub fn new(repository: Repository, max_limit: i64) -> Self {
        Self {
            repository,
            max_limit,
        }
    }

    /// Register a scanned laptop
    pub async fn register(&self, request: &RegisterLaptop) -> AppResult<Laptop> {
        let new = request.normalize()?;
        let laptop = self.repository.laptops.insert(&new).await?;

        tracing::info!(
            laptop_id = %laptop.id,
            "Registered laptop serial={} elcot={}",
            laptop.serial_number,
            laptop.elcot_number
        );
        Ok(laptop)
    }

    /// Search inventory, newest first
    pub async fn list(&self, query: &LaptopQuery) -> AppResult<Page<Laptop>> {
        let filter = LaptopFilter {
            search: normalize_filter(query.search.as_deref()),
        };
        let request = PageRequest::new(query.page, query.limit, self.max_limit);

        let (items, total) = tokio::try_join!(
            self.repository.laptops.find_many(&filter, Some(request)),
            self.repository.laptops.count(&filter),
        )?;

        Ok(Page {
            items,
            pagination: Pagination::new(total, request),
        })
    }

    /// Remove a laptop. Assignments on the same ELCOT number are kept.
    pub async fn delete(&self, id: &str) -> AppResult<DeletedLaptop> {
        let not_found = || AppError::NotFound("Laptop not found".to_string());

        let id = Uuid::parse_str(id.trim()).map_err(|_| not_found())?;
        let laptop = self
            .repository
            .laptops
            .find_by_id(id)
            .await?
            .ok_or_else(not_found)?;

        if !self.repository.laptops.delete(id).await? {
            return Err(not_found());
        }

        let orphaned_assignment = self
            .repository
            .students
            .find_by_elcot_number(&laptop.elcot_number)
            .await?;

        match orphaned_assignment {
            Some(ref assignment) => tracing::warn!(
                laptop_id = %laptop.id,
                "Deleted laptop elcot={} is still assigned to {}",
                laptop.elcot_number,
                assignment.student_name
            ),
            None => tracing::info!(laptop_id = %laptop.id, "Deleted laptop elcot={}", laptop.elcot_number),
        }

        Ok(DeletedLaptop {
            laptop,
            orphaned_assignment: orphaned_assignment.map(|mut a| {
                a.in_inventory = false;
                a
            }),
        })
    }

    /// Whole inventory as a spreadsheet
    pub async fn export(&self) -> AppResult<Report> {
        let laptops = self
            .repository
            .laptops
            .find_many(&LaptopFilter::default(), None)
            .await?;
        export::laptop_report(&laptops)
    }

    /// Store round trip for the readiness probe
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.laptops.count(&LaptopFilter::default()).await?;
        Ok(())
    }
}
