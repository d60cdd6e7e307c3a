use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::sessions::SessionRegistry;

#[derive(Clone)]
pub struct AppState {
    sessions: Arc<SessionRegistry>,
    config: Arc<Config>,
    started_at: Instant,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            sessions: Arc::new(SessionRegistry::new(
                config.max_sessions,
                Duration::from_secs(config.session_idle_ttl_secs),
            )),
            config: Arc::new(config.clone()),
            started_at: Instant::now(),
        }
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Owned handle for background workers.
    pub fn session_registry(&self) -> Arc<SessionRegistry> {
        Arc::clone(&self.sessions)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
