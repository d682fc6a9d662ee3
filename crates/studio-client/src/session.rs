use std::time::Duration;

use tracing::{debug, info};

use crate::auth::AuthManager;
use crate::error::{ApiError, StorageError};

pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";
pub const FORCED_LOGOUT_DELAY: Duration = Duration::from_secs(2);

/// User-facing message sink.
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// Last stop for API failures nobody handled: a 401 ends the session.
pub struct SessionGuard<'a> {
    auth: &'a AuthManager,
    notifier: &'a dyn Notifier,
    delay: Duration,
}

impl<'a> SessionGuard<'a> {
    pub fn new(auth: &'a AuthManager, notifier: &'a dyn Notifier) -> Self {
        Self {
            auth,
            notifier,
            delay: FORCED_LOGOUT_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns `true` when the failure forced a logout.
    pub async fn handle_unhandled(&self, err: &ApiError) -> Result<bool, StorageError> {
        debug!(status = err.status(), "unhandled api failure: {err}");
        if !err.is_unauthorized() {
            return Ok(false);
        }
        info!("session expired, logging out");
        self.notifier.error(SESSION_EXPIRED_MESSAGE);
        tokio::time::sleep(self.delay).await;
        self.auth.logout().await?;
        Ok(true)
    }
}
