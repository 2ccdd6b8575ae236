//! Admin authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::admin::{AdminClaims, LoginRequest, LoginResponse},
};

#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        if config.admin_password_hash.is_empty() {
            tracing::warn!("No admin password hash configured, admin login is disabled");
        }
        if config.jwt_secret.trim().is_empty() {
            tracing::warn!("No JWT secret configured, admin login is disabled");
        }
        Self { config }
    }

    /// Admin sessions exist only with both a password hash and a signing secret
    fn is_enabled(&self) -> bool {
        !self.config.admin_password_hash.is_empty() && !self.config.jwt_secret.trim().is_empty()
    }

    /// Check the admin credentials and issue a session token
    pub fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        request.validate().map_err(|_| {
            AppError::Validation("Username and password are required".to_string())
        })?;

        let invalid = || AppError::Authentication("Invalid username or password".to_string());

        if request.username != self.config.admin_username {
            tracing::warn!("Rejected admin login for unknown user {}", request.username);
            return Err(invalid());
        }
        if !self.is_enabled() || !self.verify_password(&request.password)? {
            tracing::warn!("Rejected admin login for {}: bad password", request.username);
            return Err(invalid());
        }

        let now = Utc::now().timestamp();
        let expires_in = self.config.jwt_expiration_hours as i64 * 3600;
        let claims = AdminClaims {
            sub: request.username.clone(),
            iat: now,
            exp: now + expires_in,
        };

        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        tracing::info!("Admin {} logged in", claims.sub);
        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in,
        })
    }

    /// Validate a bearer token
    pub fn verify_token(&self, token: &str) -> AppResult<AdminClaims> {
        if !self.is_enabled() {
            return Err(AppError::Authentication("Admin login is disabled".to_string()));
        }
        AdminClaims::from_token(token, &self.config.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))
    }

    fn verify_password(&self, password: &str) -> AppResult<bool> {
        if self.config.admin_password_hash.is_empty() {
            return Ok(false);
        }
        let parsed_hash = PasswordHash::new(&self.config.admin_password_hash)
            .map_err(|_| AppError::Internal("Invalid admin password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2, producing a value for `auth.admin_password_hash`
    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}
