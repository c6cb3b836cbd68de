//! Completion repository port.
//!
//! Completions are append-only: this port can list and create, nothing else.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::habit::{CompletionDraft, CompletionRecord};

/// Repository port for CompletionRecord documents.
#[async_trait]
pub trait CompletionRepository: Send + Sync {
    /// List a user's completions, optionally only those at or after `since`.
    ///
    /// Order is unspecified; consumers sort as needed.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on store failure
    async fn list_by_owner(
        &self,
        owner_id: &UserId,
        since: Option<Timestamp>,
    ) -> Result<Vec<CompletionRecord>, DomainError>;

    /// Create a completion record.
    ///
    /// No uniqueness constraint on (habit, day) is enforced here.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on store failure
    async fn create(&self, draft: CompletionDraft) -> Result<CompletionRecord, DomainError>;
}
