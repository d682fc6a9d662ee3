#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::{Mutex, OnceLock};

#[cfg(not(test))]
use tracing::warn;

use super::Storage;
use crate::error::StorageError;

pub const KEYRING_SERVICE: &str = "agent-studio";

/// Durable scope backed by the OS credential store, one entry per key.
pub struct KeyringStorage {
    service: String,
}

impl KeyringStorage {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }
}

impl Default for KeyringStorage {
    fn default() -> Self {
        Self::new(KEYRING_SERVICE)
    }
}

#[cfg(not(test))]
impl KeyringStorage {
    fn entry(&self, key: &str) -> Result<keyring::Entry, StorageError> {
        keyring::Entry::new(&self.service, key)
            .map_err(|err| StorageError::Keyring(format!("failed to access keyring: {err}")))
    }
}

#[cfg(not(test))]
impl Storage for KeyringStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(StorageError::Keyring(format!(
                "failed to load '{key}' from keychain: {err}"
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entry(key)?
            .set_password(value)
            .map_err(|err| StorageError::Keyring(format!("failed to store '{key}': {err}")))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match self.entry(key)?.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => {
                warn!(service = %self.service, key = %key, "failed to delete keyring entry: {err}");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
fn keyring_mock() -> &'static Mutex<HashMap<String, String>> {
    static STORE: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();
    STORE.get_or_init(|| Mutex::new(HashMap::new()))
}

#[cfg(test)]
impl KeyringStorage {
    fn mock_key(&self, key: &str) -> String {
        format!("{}::{key}", self.service)
    }
}

#[cfg(test)]
impl Storage for KeyringStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let store = keyring_mock().lock().map_err(|_| StorageError::Poisoned)?;
        Ok(store.get(&self.mock_key(key)).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut store = keyring_mock().lock().map_err(|_| StorageError::Poisoned)?;
        store.insert(self.mock_key(key), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut store = keyring_mock().lock().map_err(|_| StorageError::Poisoned)?;
        store.remove(&self.mock_key(key));
        Ok(())
    }
}
