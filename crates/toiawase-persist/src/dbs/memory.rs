//! In-memory message store.
//!
//! Keeps records in a `Vec` behind a `tokio::sync::RwLock`. Data is lost on
//! restart; used by tests and by local runs with `store = "memory"`.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{PersistError, Result};
use crate::filter::MessageFilter;
use crate::models::{DBMessage, NewMessage};
use crate::trait_client::MessageStore;

#[derive(Debug, Clone, Default)]
pub struct MemoryMessageStore {
    messages: Arc<RwLock<Vec<DBMessage>>>,
}

impl MemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn insert_message(&self, message: NewMessage) -> Result<DBMessage> {
        let stored = message.into_message(Uuid::new_v4().simple().to_string());
        self.messages.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn list_messages(&self, filter: &MessageFilter) -> Result<Vec<DBMessage>> {
        let messages = self.messages.read().await;
        // Reverse insertion order first so equal timestamps still list newest first.
        let mut matching: Vec<DBMessage> = messages
            .iter()
            .rev()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn get_message(&self, id: &str) -> Result<Option<DBMessage>> {
        let messages = self.messages.read().await;
        Ok(messages.iter().find(|m| m.id == id).cloned())
    }

    async fn update_message(&self, id: &str, name: &str, message: &str) -> Result<()> {
        let mut messages = self.messages.write().await;
        let stored = messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| PersistError::MessageNotFound(id.to_string()))?;
        stored.name = name.to_string();
        stored.message = message.to_string();
        Ok(())
    }

    async fn delete_message(&self, id: &str) -> Result<()> {
        let mut messages = self.messages.write().await;
        let index = messages
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| PersistError::MessageNotFound(id.to_string()))?;
        messages.remove(index);
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
