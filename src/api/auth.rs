//! Admin session endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::admin::{LoginRequest, LoginResponse},
};

use super::{AdminSession, JsonBody};

#[derive(Serialize, ToSchema)]
pub struct MeResponse {
    pub username: String,
}

/// Log in as administrator
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session token", body = LoginResponse),
        (status = 400, description = "Missing credentials", body = crate::error::ErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let response = state.services.auth.login(&request)?;
    Ok(Json(response))
}

/// Current admin session
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Session owner", body = MeResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn me(AdminSession(claims): AdminSession) -> Json<MeResponse> {
    Json(MeResponse {
        username: claims.sub,
    })
}
