use crate::error::{ChannelError, ChannelResult};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use web_sys::window;

const KEY_PREFIX: &str = "video_";

/// String key-value store, `localStorage` in the browser.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> ChannelResult<()>;
    fn remove(&self, key: &str) -> ChannelResult<()>;
    fn keys(&self) -> Vec<String>;
}

/// `localStorage`, or nothing when the browser refuses access (private
/// mode, disabled storage). Reads then miss and writes fail.
pub struct BrowserStorage {
    storage: Option<web_sys::Storage>,
}

impl BrowserStorage {
    pub fn local() -> Self {
        let storage = window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("localStorage is not available, uploaded previews will not be cached");
        }
        Self { storage }
    }

    fn inner(&self) -> ChannelResult<&web_sys::Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| ChannelError::Storage("localStorage is not available".into()))
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> ChannelResult<()> {
        self.inner()?
            .set_item(key, value)
            .map_err(|_| ChannelError::Storage(format!("Failed to store {key}")))
    }

    fn remove(&self, key: &str) -> ChannelResult<()> {
        self.inner()?
            .remove_item(key)
            .map_err(|_| ChannelError::Storage(format!("Failed to remove {key}")))
    }

    fn keys(&self) -> Vec<String> {
        let Some(storage) = &self.storage else {
            return Vec::new();
        };
        let len = storage.length().unwrap_or(0);
        (0..len)
            .filter_map(|i| storage.key(i).ok().flatten())
            .collect()
    }
}

lazy_static! {
    static ref SESSION_ID: String = session_id(
        chrono::Utc::now().timestamp_millis(),
        (js_sys::Math::random() * f64::from(u32::MAX)) as u32,
    );
}

fn session_id(now_ms: i64, salt: u32) -> String {
    format!("{now_ms}-{salt:08x}")
}

/// Id of the current document load. Object URLs die with the document, so a
/// reload starts a new session and orphans every entry written before it.
pub fn current_session_id() -> String {
    SESSION_ID.clone()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CacheEntry {
    url: String,
    session: String,
    stored_at: i64,
}

/// Remembers which object URL previews a freshly uploaded video.
///
/// Object URLs only resolve inside the document that created them, so this is
/// a cache and never a source of truth: entries from an earlier page load or
/// another tab, past the TTL, or for videos that no longer exist are dropped
/// by [`UploadCache::load`].
pub struct UploadCache<S> {
    store: S,
    session: String,
    ttl_ms: i64,
}

impl<S: KeyValueStore> UploadCache<S> {
    pub fn new(store: S, session: impl Into<String>, ttl_hours: i64) -> Self {
        Self {
            store,
            session: session.into(),
            ttl_ms: ttl_hours.saturating_mul(3_600_000),
        }
    }

    pub fn key_for(id: i64) -> String {
        format!("{KEY_PREFIX}{id}")
    }

    pub fn remember(&self, id: i64, url: &str, now_ms: i64) -> ChannelResult<()> {
        let entry = CacheEntry {
            url: url.to_string(),
            session: self.session.clone(),
            stored_at: now_ms,
        };
        self.store.set(&Self::key_for(id), &serde_json::to_string(&entry)?)
    }

    fn live_url(&self, raw: &str, now_ms: i64) -> Option<String> {
        let entry: CacheEntry = serde_json::from_str(raw).ok()?;
        let fresh = now_ms.saturating_sub(entry.stored_at) <= self.ttl_ms;
        (entry.url.starts_with("blob:") && entry.session == self.session && fresh)
            .then_some(entry.url)
    }

    /// Returns the live previews for `known_ids` and deletes every other
    /// `video_<id>` entry.
    pub fn load(&self, known_ids: &[i64], now_ms: i64) -> HashMap<i64, String> {
        let known: HashSet<i64> = known_ids.iter().copied().collect();
        let mut live = HashMap::new();

        for key in self.store.keys() {
            let Some(id) = key
                .strip_prefix(KEY_PREFIX)
                .and_then(|rest| rest.parse::<i64>().ok())
            else {
                continue;
            };
            let url = self
                .store
                .get(&key)
                .and_then(|raw| self.live_url(&raw, now_ms));
            match url {
                Some(url) if known.contains(&id) => {
                    live.insert(id, url);
                }
                _ => {
                    log::debug!("Dropping stale upload cache entry {key}");
                    if let Err(e) = self.store.remove(&key) {
                        log::warn!("{e}");
                    }
                }
            }
        }
        live
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use super::*;
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    /// Shared in-memory store; clones see the same entries.
    #[derive(Clone, Default)]
    pub struct MemoryStore(pub Rc<RefCell<BTreeMap<String, String>>>);

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> ChannelResult<()> {
            self.0.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> ChannelResult<()> {
            self.0.borrow_mut().remove(key);
            Ok(())
        }

        fn keys(&self) -> Vec<String> {
            self.0.borrow().keys().cloned().collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryStore;
    use super::*;

    const HOUR: i64 = 3_600_000;

    #[test]
    fn remembered_entry_comes_back_in_same_session() {
        let store = MemoryStore::default();
        let cache = UploadCache::new(store.clone(), "tab-a", 24);
        cache.remember(12, "blob:http://localhost/abc", 1_000).unwrap();

        assert!(store.get("video_12").unwrap().contains("blob:http://localhost/abc"));
        let live = cache.load(&[12], 1_000 + HOUR);
        assert_eq!(live.get(&12).map(String::as_str), Some("blob:http://localhost/abc"));
    }

    #[test]
    fn other_session_entries_are_removed() {
        let store = MemoryStore::default();
        UploadCache::new(store.clone(), "tab-a", 24)
            .remember(3, "blob:x", 0)
            .unwrap();

        let live = UploadCache::new(store.clone(), "tab-b", 24).load(&[3], 10);
        assert!(live.is_empty());
        assert!(store.get("video_3").is_none());
    }

    #[test]
    fn entries_from_before_a_reload_are_removed() {
        let store = MemoryStore::default();
        let before = session_id(1_000, 0xdead_beef);
        UploadCache::new(store.clone(), before.clone(), 24)
            .remember(8, "blob:http://localhost/old", 1_000)
            .unwrap();

        let after = session_id(2_000, 0xdead_beef);
        assert_ne!(before, after);
        let live = UploadCache::new(store.clone(), after, 24).load(&[8], 2_000);
        assert!(live.is_empty());
        assert!(store.get("video_8").is_none());
    }

    #[test]
    fn expired_unknown_and_legacy_entries_are_removed() {
        let store = MemoryStore::default();
        let cache = UploadCache::new(store.clone(), "tab", 1);
        cache.remember(1, "blob:old", 0).unwrap();
        cache.remember(2, "blob:gone", 5 * HOUR).unwrap();
        cache.remember(4, "https://cdn/not-a-blob.mp4", 5 * HOUR).unwrap();
        store.set("video_5", "blob:legacy-raw-string").unwrap();
        store.set("theme", "dark").unwrap();

        let live = cache.load(&[1, 4, 5], 5 * HOUR);
        assert!(live.is_empty());
        assert_eq!(store.keys(), vec!["theme".to_string()]);
    }
}
