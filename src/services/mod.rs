//! Business logic services

pub mod assignments;
pub mod auth;
pub mod export;
pub mod inventory;

use crate::{config::AppConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub inventory: inventory::InventoryService,
    pub assignments: assignments::AssignmentService,
    pub auth: auth::AuthService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        let max_limit = config.pagination.max_limit;
        Self {
            inventory: inventory::InventoryService::new(repository.clone(), max_limit),
            assignments: assignments::AssignmentService::new(repository, max_limit),
            auth: auth::AuthService::new(config.auth.clone()),
        }
    }
}
