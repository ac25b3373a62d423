use crate::config::Config;
use crate::llm_client::ChatClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: ChatClient,
    /// Retained for handlers that need runtime settings beyond the client.
    #[allow(dead_code)]
    pub config: Config,
}
