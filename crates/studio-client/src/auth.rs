use serde_json::Value;
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::error::{ApiError, StorageError};
use crate::storage::Scope;
use crate::types::{Credentials, LoginOutcome, LoginResponse, User};

pub const LOGIN_ENDPOINT: &str = "/auth/login";
pub const LOGOUT_ENDPOINT: &str = "/auth/logout";
pub const LOGIN_PATH: &str = "/login";

/// Where the user is sent once local auth state is gone.
pub trait Navigator: Send + Sync {
    fn navigate(&self, location: &str);
}

pub struct AuthManager {
    api: ApiClient,
    navigator: Box<dyn Navigator>,
}

impl AuthManager {
    pub fn new(api: ApiClient, navigator: Box<dyn Navigator>) -> Self {
        Self { api, navigator }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Never fails: any error is folded into `LoginOutcome::Failure` with the
    /// error's message.
    pub async fn login(&self, credentials: &Credentials) -> LoginOutcome {
        match self.try_login(credentials).await {
            Ok(user) => {
                info!(user = %user.display_name(), remember = credentials.remember, "logged in");
                LoginOutcome::Success(user)
            }
            Err(err) => {
                debug!(status = err.status(), "login failed: {err}");
                LoginOutcome::Failure(err.to_string())
            }
        }
    }

    async fn try_login(&self, credentials: &Credentials) -> Result<User, ApiError> {
        let response = self.api.post(LOGIN_ENDPOINT, Some(credentials)).await?;
        let LoginResponse { token, user } = response.json()?;

        let scope = if credentials.remember {
            Scope::Durable
        } else {
            Scope::Session
        };
        let store = self.api.store();
        store.set_token(&token, credentials.remember)?;
        if let Err(err) = store.set_current_user_in(scope, &user) {
            if let Err(clear_err) = store.clear_token() {
                warn!("failed to roll back token after login: {clear_err}");
            }
            return Err(err.into());
        }
        Ok(user)
    }

    /// Local cleanup and navigation happen even when the server call fails.
    pub async fn logout(&self) -> Result<(), StorageError> {
        if let Err(err) = self.api.post::<Value>(LOGOUT_ENDPOINT, None).await {
            warn!(status = err.status(), "Logout request failed: {err}");
        }

        let store = self.api.store();
        let token_cleared = store.clear_token();
        let user_cleared = store.clear_current_user();
        self.navigator.navigate(LOGIN_PATH);
        token_cleared.and(user_cleared)
    }

    pub fn current_user(&self) -> Result<Option<User>, StorageError> {
        self.api.store().current_user()
    }

    pub fn is_authenticated(&self) -> Result<bool, StorageError> {
        self.api.store().is_authenticated()
    }
}
