//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, health, laptops, students};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Laptop Inventory API",
        version = "0.1.0",
        description = "Laptop inventory and student assignment REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Laptops
        laptops::create_laptop,
        laptops::list_laptops,
        laptops::delete_laptop,
        laptops::export_laptops,
        // Students
        students::create_student,
        students::list_students,
        students::export_students,
        students::list_departments,
    ),
    components(
        schemas(
            // Auth
            crate::models::admin::LoginRequest,
            crate::models::admin::LoginResponse,
            auth::MeResponse,
            // Laptops
            crate::models::laptop::Laptop,
            crate::models::laptop::RegisterLaptop,
            laptops::LaptopListResponse,
            laptops::DeleteLaptopResponse,
            // Students
            crate::models::student_laptop::StudentLaptop,
            crate::models::student_laptop::AssignLaptop,
            students::StudentListResponse,
            // Shared
            crate::models::pagination::Pagination,
            health::HealthResponse,
            crate::error::ErrorResponse,
            crate::error::ErrorCode,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Admin session"),
        (name = "laptops", description = "Laptop inventory"),
        (name = "students", description = "Student laptop assignments")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
