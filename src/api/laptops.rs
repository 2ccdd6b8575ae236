//! Laptop inventory endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        laptop::{LaptopQuery, RegisterLaptop},
        Laptop, Pagination, StudentLaptop,
    },
};

use super::{attachment, AdminSession, JsonBody, QueryParams};

#[derive(Serialize, ToSchema)]
pub struct LaptopListResponse {
    pub laptops: Vec<Laptop>,
    pub pagination: Pagination,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteLaptopResponse {
    pub message: String,
    /// Assignment still holding the deleted laptop's ELCOT number
    pub orphaned_assignment: Option<StudentLaptop>,
}

/// Register a scanned laptop
#[utoipa::path(
    post,
    path = "/laptops",
    tag = "laptops",
    request_body = RegisterLaptop,
    responses(
        (status = 201, description = "Laptop registered", body = Laptop),
        (status = 400, description = "Missing serial or ELCOT number", body = crate::error::ErrorResponse),
        (status = 409, description = "Serial or ELCOT number already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_laptop(
    State(state): State<crate::AppState>,
    JsonBody(request): JsonBody<RegisterLaptop>,
) -> AppResult<(StatusCode, Json<Laptop>)> {
    let laptop = state.services.inventory.register(&request).await?;
    Ok((StatusCode::CREATED, Json(laptop)))
}

/// List laptops with search and pagination
#[utoipa::path(
    get,
    path = "/laptops",
    tag = "laptops",
    params(LaptopQuery),
    responses(
        (status = 200, description = "Laptop page", body = LaptopListResponse)
    )
)]
pub async fn list_laptops(
    State(state): State<crate::AppState>,
    QueryParams(query): QueryParams<LaptopQuery>,
) -> AppResult<Json<LaptopListResponse>> {
    let page = state.services.inventory.list(&query).await?;
    Ok(Json(LaptopListResponse {
        laptops: page.items,
        pagination: page.pagination,
    }))
}

/// Delete a laptop (admin only)
#[utoipa::path(
    delete,
    path = "/laptops/{id}",
    tag = "laptops",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Laptop ID")),
    responses(
        (status = 200, description = "Laptop deleted", body = DeleteLaptopResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 404, description = "Laptop not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_laptop(
    State(state): State<crate::AppState>,
    AdminSession(claims): AdminSession,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteLaptopResponse>> {
    tracing::debug!("Admin {} deleting laptop {}", claims.sub, id);
    let deleted = state.services.inventory.delete(&id).await?;
    Ok(Json(DeleteLaptopResponse {
        message: "Laptop deleted successfully".to_string(),
        orphaned_assignment: deleted.orphaned_assignment,
    }))
}

/// Download the inventory as a spreadsheet
#[utoipa::path(
    get,
    path = "/laptops/export",
    tag = "laptops",
    responses(
        (status = 200, description = "Inventory workbook", body = String,
            content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
    )
)]
pub async fn export_laptops(State(state): State<crate::AppState>) -> AppResult<Response> {
    let report = state.services.inventory.export().await?;
    Ok(attachment(report))
}
