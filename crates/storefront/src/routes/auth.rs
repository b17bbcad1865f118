//! Authentication route handlers.

use axum::{Json, extract::State};
use game_store_core::{AuthFlag, AuthIdentity};
use serde::Serialize;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::services::auth::{LoginForm, SignupForm};
use crate::state::AppState;

/// Current auth state.
#[derive(Debug, Serialize)]
pub struct AuthView {
    pub authenticated: bool,
    pub user: Option<AuthIdentity>,
}

impl From<&AuthFlag> for AuthView {
    fn from(flag: &AuthFlag) -> Self {
        Self {
            authenticated: flag.is_authenticated(),
            user: flag.identity().cloned(),
        }
    }
}

/// Who is signed in.
#[instrument(skip(state))]
pub async fn me(State(state): State<AppState>) -> Json<AuthView> {
    Json(AuthView::from(&state.auth().snapshot()))
}

/// Sign in with the demo account.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> Result<Json<AuthView>> {
    let identity = state.authenticator().login(&form)?;
    set_sentry_user(identity.email.as_str());
    let flag = state.auth().login(identity);
    Ok(Json(AuthView::from(&flag)))
}

/// Create an account and sign in.
#[instrument(skip_all)]
pub async fn signup(
    State(state): State<AppState>,
    Json(form): Json<SignupForm>,
) -> Result<Json<AuthView>> {
    let identity = state.authenticator().signup(&form)?;
    set_sentry_user(identity.email.as_str());
    let flag = state.auth().login(identity);
    Ok(Json(AuthView::from(&flag)))
}

/// Sign out.
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> Json<AuthView> {
    clear_sentry_user();
    Json(AuthView::from(&state.auth().logout()))
}
