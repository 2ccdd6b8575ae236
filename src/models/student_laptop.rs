//! Student laptop assignment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::{laptop::trimmed, pagination::empty_as_none};
use crate::error::{AppError, AppResult};

/// Department codes offered by the assignment form. Not enforced on write.
pub const DEPARTMENTS: &[&str] = &[
    "AERO", "AGRI", "AI & DS", "AI", "ML", "BME", "BT", "CSB", "SCS", "EEE", "CE", "MBA", "MCA",
    "MECH",
];

/// Laptop handed to a student, keyed by ELCOT number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentLaptop {
    pub id: Uuid,
    pub elcot_number: String,
    pub student_name: String,
    pub department: String,
    pub year: String,
    pub created_at: DateTime<Utc>,
    /// Whether the ELCOT number is still present in the laptop inventory
    pub in_inventory: bool,
}

/// Assign laptop request
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignLaptop {
    #[serde(default)]
    pub elcot_number: Option<String>,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewStudentLaptop {
    #[validate(length(min = 1))]
    pub elcot_number: String,
    #[validate(length(min = 1))]
    pub student_name: String,
    #[validate(length(min = 1))]
    pub department: String,
    #[validate(length(min = 1))]
    pub year: String,
}

impl AssignLaptop {
    pub fn normalize(&self) -> AppResult<NewStudentLaptop> {
        let new = NewStudentLaptop {
            elcot_number: trimmed(&self.elcot_number),
            student_name: trimmed(&self.student_name),
            department: trimmed(&self.department),
            year: trimmed(&self.year),
        };
        new.validate().map_err(|_| {
            AppError::Validation(
                "ELCOT number, student name, department, and year are required".to_string(),
            )
        })?;
        Ok(new)
    }
}

/// Assignment list query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct StudentQuery {
    /// Substring of the ELCOT number or student name (case-insensitive)
    pub search: Option<String>,
    /// Exact department code
    pub department: Option<String>,
    /// Page number (default: 1)
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<i64>,
    /// Records per page (default: 50)
    #[serde(default, deserialize_with = "empty_as_none")]
    pub limit: Option<i64>,
}

/// Store-level assignment filter; both parts are ANDed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    pub search: Option<String>,
    pub department: Option<String>,
}
