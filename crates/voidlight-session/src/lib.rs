//! In-memory MCP session map, keyed by server-generated session id, with
//! a background idle sweep. HTTP transport only — STDIO has a single
//! implicit session bound to the connection's lifetime.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::time::interval;
use uuid::Uuid;
use voidlight_protocol::initialize::Implementation;

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(5 * 60);
const SWEEP_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct McpSession {
    pub session_id: String,
    pub protocol_version: String,
    pub client_info: Option<Implementation>,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

impl McpSession {
    fn new(protocol_version: String, client_info: Option<Implementation>) -> Self {
        let now = Utc::now();
        Self {
            session_id: Uuid::new_v4().to_string(),
            protocol_version,
            client_info,
            created_at: now,
            last_activity_at: now,
        }
    }
}

/// Owned by the HTTP transport. Cheap to clone — the map itself is
/// behind an `Arc<RwLock<..>>`.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, McpSession>>>,
    idle_timeout: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TIMEOUT)
    }
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout,
        }
    }

    pub async fn create(
        &self,
        protocol_version: String,
        client_info: Option<Implementation>,
    ) -> McpSession {
        let session = McpSession::new(protocol_version, client_info);
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.session_id.clone(), session.clone());
        session
    }

    pub async fn touch(&self, session_id: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get_mut(session_id) {
            session.last_activity_at = Utc::now();
            true
        } else {
            false
        }
    }

    pub async fn get(&self, session_id: &str) -> Option<McpSession> {
        self.sessions.read().await.get(session_id).cloned()
    }

    pub async fn destroy(&self, session_id: &str) -> bool {
        self.sessions.write().await.remove(session_id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Removes sessions idle longer than the configured timeout. Returns
    /// the removed session ids, for logging by the caller.
    pub async fn sweep_expired(&self) -> Vec<String> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let expired: Vec<String> = sessions
            .iter()
            .filter(|(_, session)| {
                now.signed_duration_since(session.last_activity_at)
                    .to_std()
                    .map(|idle| idle > self.idle_timeout)
                    .unwrap_or(false)
            })
            .map(|(id, _)| id.clone())
            .collect();
        for id in &expired {
            sessions.remove(id);
        }
        expired
    }

    /// Spawns a background task that sweeps expired sessions on a fixed
    /// cadence for the lifetime of the returned handle.
    pub fn spawn_sweeper(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval(SWEEP_INTERVAL);
            loop {
                ticker.tick().await;
                let expired = self.sweep_expired().await;
                for id in expired {
                    tracing::info!(session_id = %id, "session expired after idle timeout");
                }
            }
        })
    }
}
