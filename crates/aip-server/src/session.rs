// SPDX-License-Identifier: Apache-2.0

use aip_model::Appeal;
use rand::RngCore;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

pub const SESSION_COOKIE: &str = "aip-session";

#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub appeal: Appeal,
    last_seen: Instant,
}

/// Cookie-keyed in-memory session registry. Entries expire on access after
/// the configured idle TTL; the appeal inside is the working copy that the
/// wizard pages mutate between saves.
pub struct SessionRegistry {
    ttl: Duration,
    inner: RwLock<HashMap<String, Session>>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, key: &str) -> Option<Session> {
        let mut sessions = self.inner.write().await;
        match sessions.get_mut(key) {
            Some(session) if session.last_seen.elapsed() <= self.ttl => {
                session.last_seen = Instant::now();
                Some(session.clone())
            }
            Some(_) => {
                sessions.remove(key);
                None
            }
            None => None,
        }
    }

    pub async fn insert(&self, key: &str, user_id: &str, appeal: Appeal) {
        self.inner.write().await.insert(
            key.to_string(),
            Session {
                user_id: user_id.to_string(),
                appeal,
                last_seen: Instant::now(),
            },
        );
    }

    pub async fn set_appeal(&self, key: &str, appeal: Appeal) {
        if let Some(session) = self.inner.write().await.get_mut(key) {
            session.appeal = appeal;
            session.last_seen = Instant::now();
        }
    }

    pub async fn remove(&self, key: &str) {
        self.inner.write().await.remove(key);
    }
}

/// 128 random bits, hex-encoded. Opaque to the browser.
#[must_use]
pub fn new_session_key() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sessions_round_trip_and_expire() {
        let registry = SessionRegistry::new(Duration::from_millis(40));
        registry.insert("k", "user", Appeal::default()).await;
        assert!(registry.get("k").await.is_some());
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(registry.get("k").await.is_none());
    }

    #[tokio::test]
    async fn set_appeal_updates_the_working_copy() {
        let registry = SessionRegistry::new(Duration::from_secs(60));
        registry.insert("k", "user", Appeal::default()).await;
        let mut appeal = Appeal::default();
        appeal.application.home_office_ref_number = Some("A1234567".to_string());
        registry.set_appeal("k", appeal).await;
        let session = registry.get("k").await.expect("session");
        assert_eq!(
            session.appeal.application.home_office_ref_number.as_deref(),
            Some("A1234567")
        );
    }

    #[test]
    fn session_keys_are_unique_hex() {
        let a = new_session_key();
        let b = new_session_key();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
