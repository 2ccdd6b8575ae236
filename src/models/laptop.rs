//! Laptop (inventory) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::pagination::empty_as_none;
use crate::error::{AppError, AppResult};

/// Inventoried laptop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Laptop {
    pub id: Uuid,
    /// Manufacturer serial number
    pub serial_number: String,
    /// Asset tag issued by the procuring authority
    pub elcot_number: String,
    pub created_at: DateTime<Utc>,
}

/// Register laptop request, as sent by the scan form
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterLaptop {
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub elcot_number: Option<String>,
}

/// Trimmed and validated insert payload
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewLaptop {
    #[validate(length(min = 1))]
    pub serial_number: String,
    #[validate(length(min = 1))]
    pub elcot_number: String,
}

impl RegisterLaptop {
    pub fn normalize(&self) -> AppResult<NewLaptop> {
        let new = NewLaptop {
            serial_number: trimmed(&self.serial_number),
            elcot_number: trimmed(&self.elcot_number),
        };
        new.validate().map_err(|_| {
            AppError::Validation("Serial number and ELCOT number are required".to_string())
        })?;
        Ok(new)
    }
}

pub(crate) fn trimmed(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

/// Unique laptop columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaptopField {
    SerialNumber,
    ElcotNumber,
}

impl LaptopField {
    pub fn label(&self) -> &'static str {
        match self {
            LaptopField::SerialNumber => "serial number",
            LaptopField::ElcotNumber => "ELCOT number",
        }
    }

    /// Error raised when a second laptop collides on this column
    pub fn conflict(&self) -> AppError {
        AppError::Conflict(format!("This {} already exists", self.label()))
    }
}

/// Laptop list query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct LaptopQuery {
    /// Substring of the serial or ELCOT number (case-insensitive)
    pub search: Option<String>,
    /// Page number (default: 1)
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<i64>,
    /// Records per page (default: 50)
    #[serde(default, deserialize_with = "empty_as_none")]
    pub limit: Option<i64>,
}

/// Store-level laptop filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaptopFilter {
    pub search: Option<String>,
}
