#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use studio_client::{
    ApiClient, AuthManager, ClientConfig, MemoryStorage, Navigator, Notifier, Storage,
    StorageError, TokenStore,
};

#[derive(Clone, Default)]
pub struct Recorder {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().expect("recorder lock").clone()
    }

    fn push(&self, value: &str) {
        self.entries
            .lock()
            .expect("recorder lock")
            .push(value.to_string());
    }
}

impl Navigator for Recorder {
    fn navigate(&self, location: &str) {
        self.push(location);
    }
}

impl Notifier for Recorder {
    fn error(&self, message: &str) {
        self.push(message);
    }
}

/// Memory scope that refuses writes to one key.
pub struct RejectingKey {
    key: &'static str,
    inner: MemoryStorage,
}

impl RejectingKey {
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            inner: MemoryStorage::new(),
        }
    }
}

impl Storage for RejectingKey {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if key == self.key {
            return Err(StorageError::Keyring(format!("{key} is read-only")));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}

pub fn api_client(server_url: &str, store: Arc<TokenStore>) -> ApiClient {
    let config = ClientConfig::new(format!("{server_url}/api"));
    ApiClient::new(reqwest::Client::new(), &config, store)
}

pub fn auth_manager(server_url: &str, store: Arc<TokenStore>) -> (AuthManager, Recorder) {
    let navigator = Recorder::default();
    let auth = AuthManager::new(api_client(server_url, store), Box::new(navigator.clone()));
    (auth, navigator)
}

/// An address nothing listens on.
pub fn closed_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
