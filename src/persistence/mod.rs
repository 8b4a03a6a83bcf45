//! Save/load persistence
//!
//! Features:
//! - Versioned JSON envelope
//! - Named slots: a JSON file on native, a LocalStorage key on the web
//! - Atomic file writes (tmp → save)

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;

/// Envelope format version written by this build
pub const FORMAT_VERSION: u32 = 1;

/// Wrapper stored around every persisted payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub version: u32,
    pub payload: T,
}

/// Serialize a payload inside a versioned envelope
pub fn encode<T: Serialize>(payload: &T) -> Result<String, PersistenceError> {
    let envelope = Envelope {
        version: FORMAT_VERSION,
        payload,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Parse a versioned envelope, rejecting versions this build does not know
pub fn decode<T: DeserializeOwned>(json: &str) -> Result<T, PersistenceError> {
    let envelope: Envelope<serde_json::Value> = serde_json::from_str(json)?;
    if envelope.version != FORMAT_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            found: envelope.version,
            expected: FORMAT_VERSION,
        });
    }
    Ok(serde_json::from_value(envelope.payload)?)
}

/// A named storage location
#[derive(Debug, Clone)]
pub struct Slot {
    key: String,
    #[cfg(not(target_arch = "wasm32"))]
    dir: std::path::PathBuf,
}

impl Slot {
    /// Slot in the default location (working directory on native)
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            #[cfg(not(target_arch = "wasm32"))]
            dir: std::path::PathBuf::from("."),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read and decode the slot; `Ok(None)` when nothing has been saved yet
    pub fn read<T: DeserializeOwned>(&self) -> Result<Option<T>, PersistenceError> {
        match self.read_raw()? {
            Some(json) => decode(&json).map(Some),
            None => Ok(None),
        }
    }

    /// Encode and store a value
    pub fn write<T: Serialize>(&self, value: &T) -> Result<(), PersistenceError> {
        let json = encode(value)?;
        self.write_raw(&json)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Slot {
    /// Slot stored as `<dir>/<key>.json`
    pub fn in_dir(dir: impl Into<std::path::PathBuf>, key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            dir: dir.into(),
        }
    }

    pub fn path(&self) -> std::path::PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }

    fn read_raw(&self) -> Result<Option<String>, PersistenceError> {
        match std::fs::read_to_string(self.path()) {
            Ok(json) => Ok(Some(json)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write_raw(&self, json: &str) -> Result<(), PersistenceError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path();
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &path)?;
        log::debug!("Wrote {} bytes to {}", json.len(), path.display());
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
impl Slot {
    fn storage() -> Result<web_sys::Storage, PersistenceError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistenceError::Unavailable("LocalStorage"))
    }

    fn read_raw(&self) -> Result<Option<String>, PersistenceError> {
        let storage = Self::storage()?;
        storage
            .get_item(&self.key)
            .map_err(|_| PersistenceError::Unavailable("LocalStorage read"))
    }

    fn write_raw(&self, json: &str) -> Result<(), PersistenceError> {
        let storage = Self::storage()?;
        storage
            .set_item(&self.key, json)
            .map_err(|_| PersistenceError::Unavailable("LocalStorage write"))
    }
}
