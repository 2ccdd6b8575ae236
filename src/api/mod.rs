//! API handlers for the inventory REST endpoints

pub mod auth;
pub mod health;
pub mod laptops;
pub mod openapi;
pub mod students;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::{
        header::{AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE},
        request::Parts,
    },
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::AppError,
    models::AdminClaims,
    services::export::{Report, XLSX_CONTENT_TYPE},
    AppState,
};

/// Extractor for an admin session carried as a bearer token
pub struct AdminSession(pub AdminClaims);

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let claims = state.services.auth.verify_token(token)?;
        Ok(AdminSession(claims))
    }
}

/// JSON body extractor; malformed bodies answer with the API error format
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Query string extractor; malformed parameters answer with the API error format
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);

/// Spreadsheet download response
pub(crate) fn attachment(report: Report) -> Response {
    (
        [
            (CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename={}", report.filename),
            ),
        ],
        report.bytes,
    )
        .into_response()
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Admin session
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        // Inventory
        .route("/laptops", get(laptops::list_laptops).post(laptops::create_laptop))
        .route("/laptops/export", get(laptops::export_laptops))
        .route("/laptops/:id", delete(laptops::delete_laptop))
        // Assignments
        .route("/students", get(students::list_students).post(students::create_student))
        .route("/students/export", get(students::export_students))
        .route("/departments", get(students::list_departments))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
