use std::sync::Arc;

use crate::llm_client::CompletionBackend;
use crate::users::UserStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// AI gateway. The hosted client in production, a scripted fake in tests.
    pub llm: Arc<dyn CompletionBackend>,
    pub users: Arc<UserStore>,
}
