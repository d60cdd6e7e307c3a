//! In-memory registry of planner sessions. Each session sits behind its own
//! mutex so requests against one session are serialized while sessions never
//! share state. Sessions untouched for longer than the idle TTL are evicted.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::planner::PlannerSession;
use crate::response::AppError;

pub type SharedSession = Arc<Mutex<PlannerSession>>;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("session not found: {0}")]
    NotFound(Uuid),
    #[error("session limit of {max} reached")]
    LimitReached { max: usize },
}

impl From<RegistryError> for AppError {
    fn from(value: RegistryError) -> Self {
        match &value {
            RegistryError::NotFound(_) => AppError::not_found(&value.to_string()),
            RegistryError::LimitReached { .. } => {
                AppError::too_many_requests("SESSION_LIMIT", &value.to_string())
            }
        }
    }
}

struct SessionEntry {
    session: SharedSession,
    last_access: Instant,
}

impl SessionEntry {
    fn is_idle(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.last_access) >= ttl
    }
}

pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
    max_sessions: usize,
    idle_ttl: Duration,
}

impl SessionRegistry {
    pub fn new(max_sessions: usize, idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions,
            idle_ttl,
        }
    }

    pub fn idle_ttl(&self) -> Duration {
        self.idle_ttl
    }

    /// Registers a session. When the registry is full, idle sessions are
    /// evicted first; the limit only rejects when every slot is in use.
    pub async fn create(&self, session: PlannerSession) -> Result<Uuid, RegistryError> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.max_sessions {
            let evicted = evict_idle(&mut sessions, self.idle_ttl);
            if evicted > 0 {
                tracing::info!(evicted, "Idle planner sessions evicted to make room");
            }
        }
        if sessions.len() >= self.max_sessions {
            return Err(RegistryError::LimitReached {
                max: self.max_sessions,
            });
        }

        let id = Uuid::new_v4();
        sessions.insert(
            id,
            SessionEntry {
                session: Arc::new(Mutex::new(session)),
                last_access: Instant::now(),
            },
        );
        tracing::info!(session_id = %id, active = sessions.len(), "Planner session created");
        Ok(id)
    }

    /// Looks a session up and marks it as recently used.
    pub async fn get(&self, id: Uuid) -> Result<SharedSession, RegistryError> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id).ok_or(RegistryError::NotFound(id))?;
        entry.last_access = Instant::now();
        Ok(entry.session.clone())
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), RegistryError> {
        let removed = self.sessions.write().await.remove(&id);
        match removed {
            Some(_) => {
                tracing::info!(session_id = %id, "Planner session removed");
                Ok(())
            }
            None => Err(RegistryError::NotFound(id)),
        }
    }

    /// Drops every session idle for at least the TTL and returns how many went.
    pub async fn sweep_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        evict_idle(&mut sessions, self.idle_ttl)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn evict_idle(sessions: &mut HashMap<Uuid, SessionEntry>, ttl: Duration) -> usize {
    let now = Instant::now();
    let before = sessions.len();
    sessions.retain(|_, entry| !entry.is_idle(now, ttl));
    before - sessions.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::SessionSettings;

    const HOUR: Duration = Duration::from_secs(3600);

    fn session() -> PlannerSession {
        PlannerSession::with_seed(SessionSettings::default(), 1)
    }

    #[tokio::test]
    async fn create_get_remove() {
        let registry = SessionRegistry::new(4, HOUR);
        let id = registry.create(session()).await.unwrap();

        let shared = registry.get(id).await.unwrap();
        shared.lock().await.add_subject("Math").unwrap();
        let again = registry.get(id).await.unwrap();
        assert!(again.lock().await.importance().contains("Math"));

        registry.remove(id).await.unwrap();
        assert!(matches!(registry.get(id).await, Err(RegistryError::NotFound(_))));
        assert!(registry.remove(id).await.is_err());
    }

    #[tokio::test]
    async fn sessions_are_independent() {
        let registry = SessionRegistry::new(4, HOUR);
        let a = registry.create(session()).await.unwrap();
        let b = registry.create(session()).await.unwrap();

        registry.get(a).await.unwrap().lock().await.add_subject("Art").unwrap();
        assert!(registry
            .get(b)
            .await
            .unwrap()
            .lock()
            .await
            .importance()
            .is_empty());
    }

    #[test]
    fn limit_is_enforced() {
        tokio_test::block_on(async {
            let registry = SessionRegistry::new(1, HOUR);
            registry.create(session()).await.unwrap();
            assert!(matches!(
                registry.create(session()).await,
                Err(RegistryError::LimitReached { max: 1 })
            ));
            assert_eq!(registry.len().await, 1);
        });
    }

    #[tokio::test]
    async fn fresh_sessions_survive_sweep() {
        let registry = SessionRegistry::new(4, HOUR);
        let id = registry.create(session()).await.unwrap();

        assert_eq!(registry.sweep_idle().await, 0);
        assert!(registry.get(id).await.is_ok());
    }

    #[tokio::test]
    async fn expired_sessions_are_swept_and_free_capacity() {
        let registry = SessionRegistry::new(1, Duration::ZERO);
        let stale = registry.create(session()).await.unwrap();

        assert_eq!(registry.sweep_idle().await, 1);
        assert!(registry.is_empty().await);
        assert!(matches!(registry.get(stale).await, Err(RegistryError::NotFound(_))));

        let fresh = registry.create(session()).await.unwrap();
        assert_ne!(fresh, stale);
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn full_registry_evicts_idle_sessions_on_create() {
        let registry = SessionRegistry::new(1, Duration::ZERO);
        registry.create(session()).await.unwrap();

        let replacement = registry.create(session()).await.unwrap();
        assert!(registry.get(replacement).await.is_ok());
        assert_eq!(registry.len().await, 1);
    }
}
