use tracing::debug;

use crate::error::StorageError;
use crate::storage::{MemoryStorage, Scope, Storage};
use crate::types::User;

pub const TOKEN_KEY: &str = "agent_studio_token";
pub const USER_KEY: &str = "agent_studio_user";

/// Auth token and current-user record split across a durable and a session
/// scope. Reads always prefer the durable scope.
pub struct TokenStore {
    durable: Box<dyn Storage>,
    session: Box<dyn Storage>,
}

impl TokenStore {
    pub fn new(durable: Box<dyn Storage>, session: Box<dyn Storage>) -> Self {
        Self { durable, session }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::new()), Box::new(MemoryStorage::new()))
    }

    pub fn storage(&self, scope: Scope) -> &dyn Storage {
        match scope {
            Scope::Durable => self.durable.as_ref(),
            Scope::Session => self.session.as_ref(),
        }
    }

    pub fn set_token(&self, token: &str, persistent: bool) -> Result<(), StorageError> {
        let scope = if persistent {
            Scope::Durable
        } else {
            Scope::Session
        };
        self.storage(scope).set(TOKEN_KEY, token)?;
        debug!(scope = %scope, "stored auth token");
        Ok(())
    }

    pub fn token(&self) -> Result<Option<String>, StorageError> {
        Ok(self.read_first(TOKEN_KEY)?.map(|(_, token)| token))
    }

    /// Scope the active token was read from.
    pub fn token_scope(&self) -> Result<Option<Scope>, StorageError> {
        Ok(self.read_first(TOKEN_KEY)?.map(|(scope, _)| scope))
    }

    /// Both scopes are attempted even if the first removal fails; the first
    /// error is returned.
    pub fn clear_token(&self) -> Result<(), StorageError> {
        self.remove_everywhere(TOKEN_KEY)?;
        debug!("cleared auth token from both scopes");
        Ok(())
    }

    pub fn is_authenticated(&self) -> Result<bool, StorageError> {
        Ok(self.token()?.is_some())
    }

    pub fn current_user(&self) -> Result<Option<User>, StorageError> {
        match self.read_first(USER_KEY)? {
            Some((_, raw)) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Mirrors `user` next to the active token, defaulting to the session
    /// scope when no token is stored.
    pub fn set_current_user(&self, user: &User) -> Result<(), StorageError> {
        let scope = self.token_scope()?.unwrap_or(Scope::Session);
        self.set_current_user_in(scope, user)
    }

    pub fn set_current_user_in(&self, scope: Scope, user: &User) -> Result<(), StorageError> {
        let raw = serde_json::to_string(user)?;
        self.storage(scope).set(USER_KEY, &raw)?;
        debug!(scope = %scope, "stored current user");
        Ok(())
    }

    pub fn clear_current_user(&self) -> Result<(), StorageError> {
        self.remove_everywhere(USER_KEY)
    }

    fn remove_everywhere(&self, key: &str) -> Result<(), StorageError> {
        let durable = self.durable.remove(key);
        let session = self.session.remove(key);
        durable.and(session)
    }

    fn read_first(&self, key: &str) -> Result<Option<(Scope, String)>, StorageError> {
        for scope in [Scope::Durable, Scope::Session] {
            if let Some(value) = self.storage(scope).get(key)? {
                if !value.is_empty() {
                    return Ok(Some((scope, value)));
                }
            }
        }
        Ok(None)
    }
}
