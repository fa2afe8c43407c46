use chrono::{TimeZone, Utc};
use mongodb::bson::{self, doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

use crate::filter::MessageFilter;
use crate::models::{DBMessage, NewMessage};

/// MongoDB-specific message document (uses ObjectId and BSON dates)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoMessage {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub message: String,
    #[serde(rename = "createdAt")]
    pub created_at: bson::DateTime,
}

// Conversions between database-agnostic and MongoDB-specific models

impl From<NewMessage> for MongoMessage {
    fn from(msg: NewMessage) -> Self {
        Self {
            id: ObjectId::new(),
            name: msg.name,
            message: msg.message,
            created_at: bson::DateTime::from_millis(msg.created_at.timestamp_millis()),
        }
    }
}

impl From<MongoMessage> for DBMessage {
    fn from(msg: MongoMessage) -> Self {
        Self {
            id: msg.id.to_hex(),
            name: msg.name,
            message: msg.message,
            created_at: Utc
                .timestamp_millis_opt(msg.created_at.timestamp_millis())
                .single()
                .unwrap_or_default(),
        }
    }
}

/// Translate a [`MessageFilter`] into a `find` filter document.
pub fn filter_document(filter: &MessageFilter) -> Document {
    let mut document = Document::new();
    if let Some(name) = &filter.name {
        document.insert("name", name.as_str());
    }
    if let Some(after) = filter.created_after {
        document.insert(
            "createdAt",
            doc! { "$gte": bson::DateTime::from_millis(after.timestamp_millis()) },
        );
    }
    document
}
