use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use super::Storage;
use crate::error::StorageError;

/// Stores every key of a scope in one JSON object on disk.
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// `~/.agent-studio/storage.json`
    pub fn durable_default() -> Result<Self, StorageError> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| StorageError::NoHome)?;
        Ok(Self::new(
            Path::new(&home).join(".agent-studio").join("storage.json"),
        ))
    }

    /// Lives in the per-login runtime dir when there is one, so it goes away
    /// with the user's session. Otherwise a per-user directory in the temp dir.
    pub fn session_default() -> Self {
        let dir = match std::env::var_os("XDG_RUNTIME_DIR") {
            Some(runtime) => PathBuf::from(runtime).join("agent-studio"),
            None => {
                let user = std::env::var("USER")
                    .or_else(|_| std::env::var("USERNAME"))
                    .unwrap_or_else(|_| "default".to_string());
                std::env::temp_dir().join(format!("agent-studio-{user}"))
            }
        };
        Self::new(dir.join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let contents = fs::read_to_string(&self.path).map_err(|source| self.io_error(source))?;
        if contents.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    /// Tokens are stored in the clear, so the file is owner-only (0600) and a
    /// directory created for it is 0700.
    fn save(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    let _ = fs::set_permissions(parent, fs::Permissions::from_mode(0o700));
                }
            }
        }
        let contents = serde_json::to_string_pretty(entries)?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
                .map_err(|source| self.io_error(source))?;
        }
        file.write_all(contents.as_bytes())
            .map_err(|source| self.io_error(source))?;
        debug!(path = %self.path.display(), keys = entries.len(), "saved storage file");
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut entries = self.load()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.save(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_a_new_handle() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("storage.json");
        FileStorage::new(&path).set("agent_studio_token", "abc")?;

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get("agent_studio_token")?.as_deref(), Some("abc"));
        reopened.remove("agent_studio_token")?;
        assert_eq!(reopened.get("agent_studio_token")?, None);
        Ok(())
    }

    #[test]
    fn missing_file_reads_as_empty() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path().join("absent.json"));
        assert_eq!(storage.get("anything")?, None);
        storage.remove("anything")?;
        assert!(!storage.path().exists());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn token_file_is_owner_only() -> anyhow::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("agent-studio").join("storage.json");
        FileStorage::new(&path).set("agent_studio_token", "secret")?;

        let file_mode = fs::metadata(&path)?.permissions().mode();
        assert_eq!(file_mode & 0o777, 0o600);
        let dir_mode = fs::metadata(dir.path().join("agent-studio"))?
            .permissions()
            .mode();
        assert_eq!(dir_mode & 0o777, 0o700);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn existing_readable_file_is_tightened() -> anyhow::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("storage.json");
        fs::write(&path, "{}")?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644))?;

        FileStorage::new(&path).set("agent_studio_token", "secret")?;

        assert_eq!(fs::metadata(&path)?.permissions().mode() & 0o077, 0);
        Ok(())
    }

    #[test]
    fn corrupt_file_is_reported() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json")?;
        let err = FileStorage::new(&path).get("k").unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
        Ok(())
    }
}
