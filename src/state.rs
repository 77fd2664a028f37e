use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::Repository;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn Repository>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(repo: Arc<dyn Repository>, config: AppConfig) -> Self {
        Self {
            repo,
            config: Arc::new(config),
        }
    }
}
