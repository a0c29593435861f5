//! Driving port for looking users up by email.

use async_trait::async_trait;

use crate::domain::{GiftExchangeError, User};

/// Read-only access to registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectoryQuery: Send + Sync {
    /// Fetch the full document registered under `email`.
    async fn find_user_by_email(&self, email: &str) -> Result<User, GiftExchangeError>;

    /// Report whether any user is registered under `email`.
    async fn user_exists(&self, email: &str) -> Result<bool, GiftExchangeError>;
}
