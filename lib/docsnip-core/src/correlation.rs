//! Correlation between outbound requests and their documentation
//! configuration.
//!
//! The filter that deposits configuration and the consumer that documents the
//! finished exchange sit on opposite sides of the client boundary and cannot
//! share a handle directly. They meet here instead: a process-wide store keyed
//! by the per-exchange identity token carried in [`REQUEST_ID_HEADER`].

use std::collections::HashMap;
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use crate::docs::ConfigurationSnapshot;

/// Reserved header carrying the per-exchange identity token.
///
/// [`DocCall`](crate::DocCall) injects a fresh uuid under this name on every
/// exchange; the documentation filter and the consumer both key on it.
pub const REQUEST_ID_HEADER: &str = "x-docsnip-request-id";

static GLOBAL: LazyLock<ConfigurationStore> = LazyLock::new(ConfigurationStore::default);

/// Process-wide store of deposited configuration snapshots.
///
/// Entries are single-use: [`retrieve`](Self::retrieve) removes what it
/// returns, so a second retrieval for the same completed exchange observes an
/// absent entry. Deposits never fail; depositing an already-present token
/// overwrites it (tokens are unique per exchange, so this only matters when
/// that precondition is violated, and then the newest payload wins).
#[derive(Debug, Default)]
pub struct ConfigurationStore {
    entries: Mutex<HashMap<String, ConfigurationSnapshot>>,
}

impl ConfigurationStore {
    /// The store shared by every client and consumer in this process.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, ConfigurationSnapshot>> {
        // A poisoned map is still a valid map; the store has no failure modes.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Associates a configuration snapshot with an exchange token.
    pub fn deposit(&self, token: impl Into<String>, snapshot: ConfigurationSnapshot) {
        self.entries().insert(token.into(), snapshot);
    }

    /// Takes the snapshot deposited for `token`, removing the entry.
    ///
    /// Returns `None` when nothing is deposited under the token, including
    /// when the entry has already been retrieved once.
    pub fn retrieve(&self, token: &str) -> Option<ConfigurationSnapshot> {
        self.entries().remove(token)
    }

    /// Drops every live entry.
    ///
    /// Entries for exchanges that were cancelled between deposit and retrieval
    /// stay in the store forever otherwise; a test lifecycle hook can call
    /// this between test methods.
    pub fn clear(&self) {
        self.entries().clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::DocContext;

    fn snapshot() -> ConfigurationSnapshot {
        DocContext::new("target/generated-snippets").snapshot()
    }

    #[test]
    fn test_deposit_then_retrieve_roundtrip() {
        let store = ConfigurationStore::default();
        store.deposit("token-1", snapshot());
        let retrieved = store.retrieve("token-1").expect("deposited entry");
        assert_eq!(retrieved.output_dir(), snapshot().output_dir());
    }

    #[test]
    fn test_retrieve_is_single_use() {
        let store = ConfigurationStore::default();
        store.deposit("token-2", snapshot());
        assert!(store.retrieve("token-2").is_some());
        assert!(store.retrieve("token-2").is_none());
    }

    #[test]
    fn test_retrieve_unknown_token_is_absent() {
        let store = ConfigurationStore::default();
        assert!(store.retrieve("unknown").is_none());
    }

    #[test]
    fn test_deposit_overwrites_existing_entry() {
        let store = ConfigurationStore::default();
        store.deposit("token-3", snapshot());
        let newer = DocContext::new("target/other-snippets").snapshot();
        store.deposit("token-3", newer);
        let retrieved = store.retrieve("token-3").expect("entry");
        assert_eq!(
            retrieved.output_dir(),
            std::path::Path::new("target/other-snippets")
        );
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_distinct_tokens_do_not_interfere() {
        let store = std::sync::Arc::new(ConfigurationStore::default());
        let handles: Vec<_> = (0..8)
            .map(|index| {
                let store = std::sync::Arc::clone(&store);
                std::thread::spawn(move || {
                    let token = format!("token-{index}");
                    store.deposit(token.clone(), snapshot());
                    store.retrieve(&token).is_some()
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().expect("thread finished"));
        }
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_clear_drops_orphaned_entries() {
        let store = ConfigurationStore::default();
        store.deposit("orphan", snapshot());
        store.clear();
        assert!(store.retrieve("orphan").is_none());
    }
}
