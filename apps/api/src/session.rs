//! Typed access to the per-browser session bag.
//!
//! Sessions live server-side in a `tower-sessions` memory store; the browser
//! only holds the session id cookie. Every value is stored under one of the
//! keys below and read back with a default when absent.

use serde::{de::DeserializeOwned, Serialize};
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::config::Config;
use crate::errors::AppError;

/// Logged-in user's email.
pub const USER: &str = "user";
/// Career mentor transcript.
pub const CHAT_SESSION: &str = "chat_session";
/// Guided builder progress.
pub const RESUME_BUILDER: &str = "resume_builder";
/// Free-form builder transcript.
pub const CONVERSATION: &str = "conversation";
/// Last structured resume record.
pub const RESUME_JSON: &str = "resume_json";

pub fn session_layer(config: &Config) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.cookie_secure)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(
            config.session_idle_minutes,
        )))
}

/// Reads `key`, falling back to the type's default when unset.
pub async fn load<T>(session: &Session, key: &str) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    Ok(session.get::<T>(key).await?.unwrap_or_default())
}

pub async fn load_opt<T>(session: &Session, key: &str) -> Result<Option<T>, AppError>
where
    T: DeserializeOwned,
{
    Ok(session.get::<T>(key).await?)
}

pub async fn store<T>(session: &Session, key: &str, value: &T) -> Result<(), AppError>
where
    T: Serialize + Send + Sync,
{
    session.insert(key, value).await?;
    Ok(())
}

pub async fn current_user(session: &Session) -> Result<Option<String>, AppError> {
    load_opt::<String>(session, USER).await
}
