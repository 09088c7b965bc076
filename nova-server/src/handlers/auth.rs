//! `/api/auth` routes.
//!
//! Responses use the `{success, ...}` envelope. Malformed bodies answer 500
//! with a generic message; credential and uniqueness failures answer 401 and
//! 400.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
};
use nova_core::{
    auth::{AuthError, AuthSuccess},
    models::PublicUser,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error};

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: PublicUser,
}

impl From<AuthSuccess> for AuthResponse {
    fn from(success: AuthSuccess) -> Self {
        Self {
            success: true,
            token: success.token,
            user: success.user,
        }
    }
}

/// `{success: false, message}` with a status.
#[derive(Debug)]
pub struct AuthFailure {
    status: StatusCode,
    message: &'static str,
}

impl AuthFailure {
    const LOGIN_FAILED: &'static str = "Login failed";
    const REGISTRATION_FAILED: &'static str = "Registration failed";

    fn new(status: StatusCode, message: &'static str) -> Self {
        Self { status, message }
    }

    /// Map a service error, using `fallback` for anything that is not the
    /// caller's fault.
    fn from_auth_error(err: AuthError, fallback: &'static str) -> Self {
        match err {
            AuthError::InvalidCredentials => {
                Self::new(StatusCode::UNAUTHORIZED, "Invalid credentials")
            }
            AuthError::UsernameTaken => {
                Self::new(StatusCode::BAD_REQUEST, "User already exists")
            }
            AuthError::InvalidToken => Self::invalid_token(),
            err @ (AuthError::Crypto(_) | AuthError::Internal(_)) => {
                error!(error = %err, "auth operation failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, fallback)
            }
        }
    }

    fn invalid_token() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Invalid token")
    }

    fn malformed(rejection: JsonRejection, message: &'static str) -> Self {
        debug!(error = %rejection.body_text(), "rejected auth request body");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for AuthFailure {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({ "success": false, "message": self.message })),
        )
            .into_response()
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, AuthFailure> {
    let Json(request) = body
        .map_err(|rejection| AuthFailure::malformed(rejection, AuthFailure::LOGIN_FAILED))?;

    state
        .auth
        .login(&request.username, &request.password)
        .await
        .map(|success| Json(success.into()))
        .map_err(|err| AuthFailure::from_auth_error(err, AuthFailure::LOGIN_FAILED))
}

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, AuthFailure> {
    let Json(request) = body.map_err(|rejection| {
        AuthFailure::malformed(rejection, AuthFailure::REGISTRATION_FAILED)
    })?;

    state
        .auth
        .register(&request.username, &request.password, &request.email)
        .await
        .map(|success| Json(success.into()))
        .map_err(|err| {
            AuthFailure::from_auth_error(err, AuthFailure::REGISTRATION_FAILED)
        })
}

pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AuthFailure> {
    let token = bearer_token(&headers).ok_or_else(AuthFailure::invalid_token)?;

    let user = state
        .auth
        .current_user(token)
        .await
        .map_err(|err| AuthFailure::from_auth_error(err, "Invalid token"))?;

    Ok(Json(json!({ "success": true, "user": user })).into_response())
}

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AuthFailure> {
    let token = bearer_token(&headers).ok_or_else(AuthFailure::invalid_token)?;

    state.auth.logout(token).await;
    Ok(Json(json!({ "success": true })).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_requires_scheme_and_value() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn service_errors_map_to_statuses() {
        let failure = AuthFailure::from_auth_error(
            AuthError::UsernameTaken,
            AuthFailure::REGISTRATION_FAILED,
        );
        assert_eq!(failure.status, StatusCode::BAD_REQUEST);

        let failure = AuthFailure::from_auth_error(
            AuthError::Internal("join error".into()),
            AuthFailure::LOGIN_FAILED,
        );
        assert_eq!(failure.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(failure.message, "Login failed");
    }
}
