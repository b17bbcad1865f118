//! Auth commands.

use game_store_storefront::routes::auth::AuthView;
use game_store_storefront::services::auth::{LoginForm, SignupForm};
use game_store_storefront::state::AppState;

use super::{CliError, print_json};

pub fn login(state: &AppState, email: String, password: String) -> Result<(), CliError> {
    let identity = state
        .authenticator()
        .login(&LoginForm { email, password })?;
    print_json(&AuthView::from(&state.auth().login(identity)))
}

pub fn signup(
    state: &AppState,
    name: String,
    email: String,
    password: String,
) -> Result<(), CliError> {
    let identity = state.authenticator().signup(&SignupForm {
        name,
        email,
        password,
    })?;
    print_json(&AuthView::from(&state.auth().login(identity)))
}

pub fn logout(state: &AppState) -> Result<(), CliError> {
    print_json(&AuthView::from(&state.auth().logout()))
}

pub fn whoami(state: &AppState) -> Result<(), CliError> {
    print_json(&AuthView::from(&state.auth().snapshot()))
}
