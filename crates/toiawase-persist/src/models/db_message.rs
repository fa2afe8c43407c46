use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Database-agnostic message model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DBMessage {
    pub id: String,
    pub name: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// A submission that has passed validation but has not been stored yet.
///
/// The store assigns the identifier; `created_at` defaults to the moment the
/// value is built, truncated to the millisecond precision every backend keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub name: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl NewMessage {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            created_at: Utc::now().trunc_subsecs(3),
        }
    }

    /// Override the creation time (imports, fixtures).
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at.trunc_subsecs(3);
        self
    }

    pub fn into_message(self, id: impl Into<String>) -> DBMessage {
        DBMessage {
            id: id.into(),
            name: self.name,
            message: self.message,
            created_at: self.created_at,
        }
    }
}
