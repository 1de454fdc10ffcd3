//! Storage gateway port for profiles.

use async_trait::async_trait;

use crate::error::Result;
use crate::profile::Profile;

/// Port for profile persistence.
///
/// Every write is atomic over the profile row and its address row.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Whether a profile with `id` exists.
    async fn exists_by_id(&self, id: &str) -> Result<bool>;

    /// Whether a profile uses `email`.
    async fn exists_by_email(&self, email: &str) -> Result<bool>;

    /// Find a profile, joined with its address.
    async fn find_by_id(&self, id: &str) -> Result<Option<Profile>>;

    /// Insert a profile and its address.
    ///
    /// Returns [`crate::error::ServerError::Conflict`] when `id` or `email`
    /// is already taken.
    async fn insert(&self, profile: &Profile) -> Result<()>;

    /// Persist names, phone and address of an existing profile.
    ///
    /// Returns `false` if no profile matched.
    async fn update(&self, profile: &Profile) -> Result<bool>;

    /// Delete a profile and its address.
    ///
    /// Returns `false` if no profile matched.
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Number of stored profiles.
    async fn count(&self) -> Result<i64>;
}
