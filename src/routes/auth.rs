//! Session routes: login, registration, demo login, logout.
//!
//! DESIGN
//! ======
//! There is one session per running store. `AuthUser` gates every ticket
//! and dashboard route on that session being present; the entry points in
//! this file are the only routes reachable without it.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::Json;

use super::{ApiError, ApiJson};
use crate::session::{LoginForm, Registration, User};
use crate::state::AppState;

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// The logged-in user. Use as a handler parameter to require a session.
pub struct AuthUser {
    pub user: User,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(_parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let store = app_state.store.read().await;
        let user = store.current_user().cloned().ok_or(StatusCode::UNAUTHORIZED)?;
        Ok(Self { user })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/login`: any non-empty email and password log in.
pub async fn login(State(state): State<AppState>, ApiJson(form): ApiJson<LoginForm>) -> Result<Json<User>, ApiError> {
    form.validate()?;
    let user = state.store.write().await.login(&form.email, &form.password)?;
    Ok(Json(user))
}

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<AppState>,
    ApiJson(registration): ApiJson<Registration>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.store.write().await.register(&registration)?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /api/auth/demo`
pub async fn demo_login(State(state): State<AppState>) -> Result<Json<User>, ApiError> {
    let user = state.store.write().await.demo_login()?;
    Ok(Json(user))
}

/// `POST /api/auth/logout`: succeeds whether or not a session exists.
pub async fn logout(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.store.write().await.logout()?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/auth/me`
pub async fn me(auth: AuthUser) -> Json<User> {
    Json(auth.user)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
