//! Request authentication.
//!
//! Sign-in happens upstream. The gateway in front of this service proves
//! itself with a pre-shared key and forwards the signed-in user's id in
//! [`USER_ID_HEADER`]. The extractors below turn that id into a [`Profile`]
//! and check what the user may do.

use axum::{
    extract::{FromRequestParts, Request},
    http::{header, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use subtle::ConstantTimeEq;

use crate::errors::{codes, AppError, ErrorResponse};
use crate::models::Profile;
use crate::AppState;

/// Header name for the API key.
pub const API_KEY_HEADER: &str = "x-api-key";
/// Id of the signed-in user.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Display name from the identity provider, used to fill an empty profile.
pub const USER_NAME_HEADER: &str = "x-user-name";
/// Avatar from the identity provider, used to fill an empty profile.
pub const USER_AVATAR_HEADER: &str = "x-user-avatar";

/// PSK authentication layer function that takes the expected PSK as a parameter.
pub async fn psk_auth_layer(
    expected_psk: Option<String>,
    request: Request,
    next: Next,
) -> Response {
    // If no PSK is configured, allow all requests (dev mode)
    let Some(expected) = expected_psk else {
        return next.run(request).await;
    };

    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .or_else(|| {
            request
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.strip_prefix("Bearer "))
        })
        .map(|s| s.to_string());

    match provided {
        Some(key) if constant_time_compare(&key, &expected) => next.run(request).await,
        Some(_) => unauthorized_response("Invalid API key"),
        None => unauthorized_response("Missing API key"),
    }
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Create an unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    let body = ErrorResponse::new(codes::UNAUTHORIZED, message);
    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

fn header_value<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// The signed-in user, if the gateway identified one.
pub struct MaybeUser(pub Option<Profile>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let Some(user_id) = header_value(parts, USER_ID_HEADER) else {
            return Ok(MaybeUser(None));
        };

        let profile = state
            .repo
            .ensure_profile(
                user_id,
                header_value(parts, USER_NAME_HEADER),
                header_value(parts, USER_AVATAR_HEADER),
            )
            .await?;

        Ok(MaybeUser(Some(profile)))
    }
}

/// Any signed-in user.
pub struct CurrentUser(pub Profile);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        MaybeUser::from_request_parts(parts, state)
            .await?
            .0
            .map(CurrentUser)
            .ok_or_else(|| AppError::Unauthorized("Sign in required".to_string()))
    }
}

/// A signed-in user whose account an administrator has activated.
pub struct ActiveMember(pub Profile);

impl FromRequestParts<AppState> for ActiveMember {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let CurrentUser(profile) = CurrentUser::from_request_parts(parts, state).await?;
        if profile.is_active || profile.is_admin() {
            Ok(ActiveMember(profile))
        } else {
            Err(AppError::Forbidden(
                "Account has not been activated yet".to_string(),
            ))
        }
    }
}

/// A signed-in administrator.
pub struct AdminUser(pub Profile);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let CurrentUser(profile) = CurrentUser::from_request_parts(parts, state).await?;
        if profile.is_admin() {
            Ok(AdminUser(profile))
        } else {
            tracing::warn!(user_id = %profile.id, "admin operation refused");
            Err(AppError::Forbidden(
                "Only administrators may do this".to_string(),
            ))
        }
    }
}
