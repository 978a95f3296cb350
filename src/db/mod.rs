//! Database layer (MongoDB, plus an in-memory store for tests).

pub mod memory;
pub mod mongo;

pub use memory::MemoryProfileStore;
pub use mongo::MongoProfileStore;

use crate::error::AppError;
use crate::models::UserProfile;
use async_trait::async_trait;

/// Field holding the unique phone number.
pub const MSISDN_FIELD: &str = "msisdn";

/// Document store operations used by the profile handlers.
///
/// Implementations classify their failures into [`AppError`] so handlers
/// never see client-specific error types.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Create the unique, sparse `msisdn` index.
    async fn ensure_indexes(&self) -> Result<(), AppError>;

    /// Insert a new profile. A duplicate `msisdn` yields [`AppError::Conflict`].
    async fn insert(&self, profile: &UserProfile) -> Result<(), AppError>;

    /// All profiles, in store order.
    async fn find_all(&self) -> Result<Vec<UserProfile>, AppError>;

    async fn find_by_msisdn(&self, msisdn: &str) -> Result<Option<UserProfile>, AppError>;

    /// Replace the document matched by `msisdn` with `profile`.
    ///
    /// Returns `false` if nothing matched.
    async fn replace_by_msisdn(&self, msisdn: &str, profile: &UserProfile)
        -> Result<bool, AppError>;

    /// Delete the document matched by `msisdn`. Returns `false` if nothing matched.
    async fn delete_by_msisdn(&self, msisdn: &str) -> Result<bool, AppError>;

    /// Release connections. Called once on process shutdown.
    async fn shutdown(&self) {}
}
