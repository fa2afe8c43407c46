use async_trait::async_trait;

use crate::error::Result;
use crate::filter::MessageFilter;
use crate::models::{DBMessage, NewMessage};

/// Trait for message persistence operations
///
/// Implementations provide backend-specific CRUD operations. Every listing
/// is ordered by `created_at` descending (newest first).
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Store a new message and return it with its assigned identifier
    async fn insert_message(&self, message: NewMessage) -> Result<DBMessage>;

    /// List messages matching the filter, newest first
    async fn list_messages(&self, filter: &MessageFilter) -> Result<Vec<DBMessage>>;

    /// Get a message by ID
    async fn get_message(&self, id: &str) -> Result<Option<DBMessage>>;

    /// Replace name and message of an existing record.
    ///
    /// Fails with `MessageNotFound` when no record has this ID.
    async fn update_message(&self, id: &str, name: &str, message: &str) -> Result<()>;

    /// Delete a message.
    ///
    /// Fails with `MessageNotFound` when no record has this ID.
    async fn delete_message(&self, id: &str) -> Result<()>;

    /// Lightweight connectivity check
    async fn ping(&self) -> Result<()>;
}
