//! Preference persistence
//!
//! The engine stores two values: the best score and whether audio is enabled.
//! Missing or unreadable values fall back to defaults, and write failures are
//! logged and ignored.

pub mod storage;

pub use storage::{JsonFileStorage, MemoryStorage, Storage, StorageError};

/// Read a non-negative integer, falling back on missing or invalid values
pub fn read_number(storage: &dyn Storage, key: &str, fallback: u64) -> u64 {
    let Some(raw) = storage.get_item(key) else {
        return fallback;
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value as u64,
        _ => {
            log::warn!("Ignoring invalid stored value for {key}: {raw:?}");
            fallback
        }
    }
}

/// Read a boolean. Missing falls back; anything other than "true" is false.
pub fn read_bool(storage: &dyn Storage, key: &str, fallback: bool) -> bool {
    match storage.get_item(key) {
        Some(raw) => raw == "true",
        None => fallback,
    }
}

pub fn persist_number(storage: &mut dyn Storage, key: &str, value: u64) {
    if let Err(e) = storage.set_item(key, &value.to_string()) {
        log::warn!("Failed to persist {key}: {e}");
    }
}

pub fn persist_bool(storage: &mut dyn Storage, key: &str, value: bool) {
    let raw = if value { "true" } else { "false" };
    if let Err(e) = storage.set_item(key, raw) {
        log::warn!("Failed to persist {key}: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ReadOnly;

    impl Storage for ReadOnly {
        fn get_item(&self, _key: &str) -> Option<String> {
            None
        }

        fn set_item(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io {
                path: key.into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    #[test]
    fn test_read_number_fallbacks() {
        let storage = MemoryStorage::new()
            .with_item("good", "17")
            .with_item("float", "4.0")
            .with_item("junk", "abc")
            .with_item("negative", "-3")
            .with_item("nan", "NaN");
        assert_eq!(read_number(&storage, "good", 0), 17);
        assert_eq!(read_number(&storage, "float", 0), 4);
        assert_eq!(read_number(&storage, "junk", 0), 0);
        assert_eq!(read_number(&storage, "negative", 0), 0);
        assert_eq!(read_number(&storage, "nan", 5), 5);
        assert_eq!(read_number(&storage, "missing", 9), 9);
    }

    #[test]
    fn test_read_bool() {
        let storage = MemoryStorage::new()
            .with_item("on", "true")
            .with_item("off", "false")
            .with_item("other", "yes");
        assert!(read_bool(&storage, "on", false));
        assert!(!read_bool(&storage, "off", true));
        assert!(!read_bool(&storage, "other", true));
        assert!(read_bool(&storage, "missing", true));
    }

    #[test]
    fn test_persist_round_trip() {
        let mut storage = MemoryStorage::new();
        persist_number(&mut storage, "n", 42);
        persist_bool(&mut storage, "b", false);
        assert_eq!(read_number(&storage, "n", 0), 42);
        assert!(!read_bool(&storage, "b", true));
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let mut storage = ReadOnly;
        persist_number(&mut storage, "n", 1);
        persist_bool(&mut storage, "b", true);
    }
}
