//! Family JWT authentication extractor.
//!
//! Provides an Axum extractor exposing the authenticated caller identity
//! to route handlers.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::family_auth::FamilyAuth as FamilyAuthData;
use domain::models::FamilyRole;

/// Authenticated family member identity from JWT.
///
/// This extractor validates the Bearer token in the Authorization header
/// and provides access to the caller's user id, family id and role.
#[derive(Debug, Clone)]
pub struct FamilyAuth {
    /// User ID from the JWT subject claim.
    pub user_id: Uuid,
    /// Family scope for every query the handler makes.
    pub family_id: Uuid,
    /// Role within the family.
    pub role: FamilyRole,
}

impl FamilyAuth {
    /// Rejects callers without the parent role.
    pub fn require_parent(&self) -> Result<(), ApiError> {
        if self.role != FamilyRole::Parent {
            return Err(ApiError::Forbidden("Parent role required".to_string()));
        }
        Ok(())
    }
}

impl From<FamilyAuthData> for FamilyAuth {
    fn from(data: FamilyAuthData) -> Self {
        Self {
            user_id: data.user_id,
            family_id: data.family_id,
            role: data.role,
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for FamilyAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // First, check if auth info was already inserted by middleware
        if let Some(auth) = parts.extensions.get::<FamilyAuthData>() {
            return Ok(auth.clone().into());
        }

        // Otherwise, extract and validate the token directly
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        if !auth_header.starts_with("Bearer ") {
            return Err(ApiError::Unauthorized(
                "Invalid Authorization header format".to_string(),
            ));
        }

        let token = &auth_header[7..];

        let jwt_config =
            FamilyAuthData::create_jwt_config(&state.config.jwt).map_err(ApiError::Internal)?;

        let auth_data = FamilyAuthData::validate(&jwt_config, token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(auth_data.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_parent_allows_parent() {
        let auth = FamilyAuth {
            user_id: Uuid::new_v4(),
            family_id: Uuid::new_v4(),
            role: FamilyRole::Parent,
        };
        assert!(auth.require_parent().is_ok());
    }

    #[test]
    fn test_require_parent_rejects_child() {
        let auth = FamilyAuth {
            user_id: Uuid::new_v4(),
            family_id: Uuid::new_v4(),
            role: FamilyRole::Child,
        };
        let err = auth.require_parent().unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[test]
    fn test_from_middleware_auth() {
        let data = FamilyAuthData {
            user_id: Uuid::new_v4(),
            family_id: Uuid::new_v4(),
            role: FamilyRole::Child,
            jti: "jti".to_string(),
        };
        let auth: FamilyAuth = data.clone().into();
        assert_eq!(auth.user_id, data.user_id);
        assert_eq!(auth.family_id, data.family_id);
        assert_eq!(auth.role, FamilyRole::Child);
    }
}
