//! JWT extractor
//!
//! Validates the bearer token and yields the [`VendorContext`] in protected
//! handlers.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::{JwtService, VendorContext};
use crate::core::ServerState;
use shared::AppError;

impl FromRequestParts<ServerState> for VendorContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Reuse the context if an earlier extractor already validated it
        if let Some(ctx) = parts.extensions.get::<VendorContext>() {
            return Ok(ctx.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header {
            Some(header) => JwtService::extract_from_header(header)
                .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
            None => {
                tracing::warn!(uri = %parts.uri, "Request without authorization header");
                return Err(AppError::unauthorized());
            }
        };

        let jwt_service = state.get_jwt_service();
        match jwt_service.validate_token(token) {
            Ok(claims) => {
                let ctx = VendorContext::from(claims);
                parts.extensions.insert(ctx.clone());
                Ok(ctx)
            }
            Err(e) => {
                tracing::warn!(uri = %parts.uri, error = %e, "Token validation failed");
                match e {
                    crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                    _ => Err(AppError::invalid_token("Invalid token")),
                }
            }
        }
    }
}
