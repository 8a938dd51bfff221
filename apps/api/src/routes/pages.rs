//! Server-rendered pages. Templates are embedded at compile time and filled by
//! plain placeholder substitution; substituted values are HTML-escaped.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::errors::AppError;
use crate::session;
use crate::state::AppState;

pub const LOGIN_PAGE: &str = include_str!("../../templates/login.html");
pub const REGISTER_PAGE: &str = include_str!("../../templates/register.html");
const MAIN_PAGE: &str = include_str!("../../templates/main.html");
const CAREER_PAGE: &str = include_str!("../../templates/career.html");
const ANALYZER_PAGE: &str = include_str!("../../templates/analyzer.html");
const BUILDER_PAGE: &str = include_str!("../../templates/builder.html");

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Replaces each `{{name}}` placeholder with the escaped value.
pub fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    values.iter().fold(template.to_string(), |page, (name, value)| {
        page.replace(&format!("{{{{{name}}}}}"), &escape_html(value))
    })
}

/// GET /
pub async fn handle_index() -> Redirect {
    Redirect::to("/login")
}

/// GET /main
pub async fn handle_main(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let Some(email) = session::current_user(&session).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let full_name = state
        .users
        .get(&email)
        .await?
        .map(|user| user.full_name())
        .unwrap_or_default();

    let page = render_template(
        MAIN_PAGE,
        &[("username", full_name.as_str()), ("email", email.as_str())],
    );
    Ok(Html(page).into_response())
}

async fn protected_page(session: &Session, page: &'static str) -> Result<Response, AppError> {
    if session::current_user(session).await?.is_none() {
        return Ok(Redirect::to("/login").into_response());
    }
    Ok(Html(page).into_response())
}

/// GET /career
pub async fn handle_career(session: Session) -> Result<Response, AppError> {
    protected_page(&session, CAREER_PAGE).await
}

/// GET /analyzer
pub async fn handle_analyzer(session: Session) -> Result<Response, AppError> {
    protected_page(&session, ANALYZER_PAGE).await
}

/// GET /builder
pub async fn handle_builder_page(session: Session) -> Result<Response, AppError> {
    protected_page(&session, BUILDER_PAGE).await
}
