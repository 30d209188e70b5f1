//! Family JWT authentication middleware.
//!
//! Provides middleware for requiring JWT-based family authentication on routes.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::app::AppState;
use crate::config::JwtAuthConfig;
use domain::models::FamilyRole;
use shared::jwt::JwtConfig;

/// Authenticated caller identity extracted from JWT.
#[derive(Debug, Clone)]
pub struct FamilyAuth {
    /// User ID from the JWT subject claim.
    pub user_id: Uuid,
    /// Family the caller belongs to. Every data access is scoped to it.
    pub family_id: Uuid,
    /// Role within the family.
    pub role: FamilyRole,
    /// JWT ID (jti) for session tracking.
    pub jti: String,
}

impl FamilyAuth {
    /// Validates an access token and returns the caller identity.
    pub fn validate(jwt_config: &JwtConfig, token: &str) -> Result<Self, String> {
        let claims = jwt_config
            .validate_access_token(token)
            .map_err(|e| format!("Invalid token: {}", e))?;

        let user_id =
            Uuid::parse_str(&claims.sub).map_err(|_| "Invalid user ID in token".to_string())?;

        let role = FamilyRole::from_str(&claims.role)
            .ok_or_else(|| format!("Unknown family role in token: {}", claims.role))?;

        Ok(FamilyAuth {
            user_id,
            family_id: claims.family_id,
            role,
            jti: claims.jti,
        })
    }

    /// Creates a JwtConfig from JwtAuthConfig.
    pub fn create_jwt_config(config: &JwtAuthConfig) -> Result<JwtConfig, String> {
        JwtConfig::with_leeway(
            &config.private_key,
            &config.public_key,
            config.access_token_expiry_secs,
            config.refresh_token_expiry_secs,
            config.leeway_secs,
        )
        .map_err(|e| format!("Failed to initialize JWT config: {}", e))
    }
}

/// Middleware that requires JWT family authentication.
///
/// This middleware validates the Bearer token in the Authorization header
/// and rejects requests without a valid JWT. The caller identity is stored
/// in request extensions for use by downstream handlers.
pub async fn require_family_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    // Extract Bearer token from Authorization header
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            return unauthorized_response("Missing or invalid Authorization header");
        }
    };

    // Create JWT config
    let jwt_config = match FamilyAuth::create_jwt_config(&state.config.jwt) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to create JWT config: {}", e);
            return internal_error_response("Authentication service unavailable");
        }
    };

    // Validate the token
    match FamilyAuth::validate(&jwt_config, token) {
        Ok(auth) => {
            // Store the caller identity in request extensions
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!("JWT validation failed: {}", e);
            unauthorized_response("Invalid or expired token")
        }
    }
}

/// Helper to create unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "unauthorized",
            "message": message
        })),
    )
        .into_response()
}

/// Helper to create internal error response.
fn internal_error_response(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": message
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_response() {
        let response = unauthorized_response("Missing or invalid Authorization header");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_internal_error_response() {
        let response = internal_error_response("Authentication service unavailable");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_family_auth_struct() {
        let auth = FamilyAuth {
            user_id: Uuid::new_v4(),
            family_id: Uuid::new_v4(),
            role: FamilyRole::Parent,
            jti: "test_jti".to_string(),
        };
        assert_eq!(auth.role, FamilyRole::Parent);
        assert!(!auth.jti.is_empty());
    }

    #[test]
    fn test_family_auth_clone() {
        let auth = FamilyAuth {
            user_id: Uuid::new_v4(),
            family_id: Uuid::new_v4(),
            role: FamilyRole::Child,
            jti: "test_jti".to_string(),
        };
        let cloned = auth.clone();
        assert_eq!(auth.user_id, cloned.user_id);
        assert_eq!(auth.family_id, cloned.family_id);
        assert_eq!(auth.role, cloned.role);
    }

    #[test]
    fn test_create_jwt_config_rejects_bad_keys() {
        let config = JwtAuthConfig {
            private_key: "not a pem".to_string(),
            public_key: "not a pem".to_string(),
            access_token_expiry_secs: 3600,
            refresh_token_expiry_secs: 2592000,
            leeway_secs: 30,
        };
        let result = FamilyAuth::create_jwt_config(&config);
        assert!(result.is_err());
    }
}
