//! Client for the Agent Studio HTTP API: request wrapper, auth-state storage
//! and the login/logout flow.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod session;
pub mod storage;
pub mod token_store;
pub mod types;

pub use api::{ApiClient, ApiResponse, RequestOptions, ResponseBody};
pub use auth::{AuthManager, Navigator, LOGIN_PATH};
pub use config::{ClientConfig, DEFAULT_API_BASE_URL};
pub use error::{ApiError, StorageError};
pub use session::{Notifier, SessionGuard, SESSION_EXPIRED_MESSAGE};
pub use storage::{FileStorage, KeyringStorage, MemoryStorage, Scope, Storage};
pub use token_store::{TokenStore, TOKEN_KEY, USER_KEY};
pub use types::{Credentials, LoginOutcome, User};
