//! Application state.

use std::sync::Arc;

use clipkit_media::ToolPaths;

use crate::config::ApiConfig;

/// Shared application state.
///
/// Holds only immutable configuration; requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub tools: Arc<ToolPaths>,
}

impl AppState {
    /// Create new application state, resolving tool binaries once.
    pub fn new(config: ApiConfig) -> Self {
        let tools = Arc::new(ToolPaths::discover());
        Self { config, tools }
    }
}
