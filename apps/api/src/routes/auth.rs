//! Form login, registration, and logout against the flat-file user store.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::info;

use crate::errors::AppError;
use crate::routes::pages::{LOGIN_PAGE, REGISTER_PAGE};
use crate::session;
use crate::state::AppState;
use crate::users::UserRecord;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default, rename = "firstName")]
    pub first_name: String,
    #[serde(default, rename = "lastName")]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// GET /login
pub async fn handle_login_page() -> Html<&'static str> {
    Html(LOGIN_PAGE)
}

/// POST /login
pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let email = form.email.trim();
    let user = state.users.authenticate(email, &form.password).await?;
    if user.is_none() {
        info!("Failed login for {email}");
        return Err(AppError::Plain(StatusCode::UNAUTHORIZED, "Invalid credentials"));
    }

    // New id on privilege change so a pre-login session id cannot be reused.
    session.cycle_id().await?;
    session::store(&session, session::USER, &email.to_string()).await?;
    info!("User {email} logged in");
    Ok(Redirect::to("/main").into_response())
}

/// GET /register
pub async fn handle_register_page() -> Html<&'static str> {
    Html(REGISTER_PAGE)
}

/// POST /register
pub async fn handle_register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Redirect, AppError> {
    let email = form.email.trim();
    if email.is_empty() {
        return Err(AppError::Validation("email is required".to_string()));
    }
    if form.password.is_empty() {
        return Err(AppError::Validation("password is required".to_string()));
    }

    state
        .users
        .register(
            email,
            UserRecord {
                first: form.first_name.trim().to_string(),
                last: form.last_name.trim().to_string(),
                password: form.password,
            },
        )
        .await?;

    Ok(Redirect::to("/login"))
}

/// POST /logout
pub async fn handle_logout(session: Session) -> Result<Redirect, AppError> {
    session.flush().await?;
    Ok(Redirect::to("/login"))
}
