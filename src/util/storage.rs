//! Browser `localStorage` helpers for persisted UI preferences.
//!
//! SYSTEM CONTEXT
//! ==============
//! Storage can be missing or throw (private browsing, disabled cookies). These
//! helpers fold every such failure into "no value" on read and a dropped
//! write, so callers only ever see `Option<String>`.

/// Load the raw string stored under `key`.
pub fn load(key: &str) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
        storage.get_item(key).ok().flatten()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        None
    }
}

/// Store `value` under `key`. Returns whether the write reached storage.
pub fn save(key: &str, value: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
            log::debug!("localStorage unavailable; dropping {key}");
            return false;
        };
        storage.set_item(key, value).is_ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (key, value);
        false
    }
}
