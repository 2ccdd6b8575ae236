//! Student assignment endpoints

use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        student_laptop::{AssignLaptop, StudentQuery, DEPARTMENTS},
        Pagination, StudentLaptop,
    },
};

use super::{attachment, JsonBody, QueryParams};

#[derive(Serialize, ToSchema)]
pub struct StudentListResponse {
    pub students: Vec<StudentLaptop>,
    pub pagination: Pagination,
}

/// Assign a laptop to a student
#[utoipa::path(
    post,
    path = "/students",
    tag = "students",
    request_body = AssignLaptop,
    responses(
        (status = 201, description = "Laptop assigned", body = StudentLaptop),
        (status = 400, description = "Missing fields", body = crate::error::ErrorResponse),
        (status = 404, description = "ELCOT number not in inventory", body = crate::error::ErrorResponse),
        (status = 409, description = "ELCOT number already assigned", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_student(
    State(state): State<crate::AppState>,
    JsonBody(request): JsonBody<AssignLaptop>,
) -> AppResult<(StatusCode, Json<StudentLaptop>)> {
    let assignment = state.services.assignments.assign(&request).await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

/// List assignments with search, department filter and pagination
#[utoipa::path(
    get,
    path = "/students",
    tag = "students",
    params(StudentQuery),
    responses(
        (status = 200, description = "Assignment page", body = StudentListResponse)
    )
)]
pub async fn list_students(
    State(state): State<crate::AppState>,
    QueryParams(query): QueryParams<StudentQuery>,
) -> AppResult<Json<StudentListResponse>> {
    let page = state.services.assignments.list(&query).await?;
    Ok(Json(StudentListResponse {
        students: page.items,
        pagination: page.pagination,
    }))
}

/// Download all assignments as a spreadsheet
#[utoipa::path(
    get,
    path = "/students/export",
    tag = "students",
    responses(
        (status = 200, description = "Assignment workbook", body = String,
            content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
    )
)]
pub async fn export_students(State(state): State<crate::AppState>) -> AppResult<Response> {
    let report = state.services.assignments.export().await?;
    Ok(attachment(report))
}

/// Department codes offered by the assignment form
#[utoipa::path(
    get,
    path = "/departments",
    tag = "students",
    responses(
        (status = 200, description = "Department codes", body = Vec<String>)
    )
)]
pub async fn list_departments() -> Json<Vec<&'static str>> {
    Json(DEPARTMENTS.to_vec())
}
