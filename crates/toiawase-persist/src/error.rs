use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[cfg(feature = "mongodb")]
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[cfg(feature = "mongodb")]
    #[error("BSON serialization error: {0}")]
    BsonSerialization(#[from] bson::ser::Error),

    #[cfg(feature = "mongodb")]
    #[error("BSON deserialization error: {0}")]
    BsonDeserialization(#[from] bson::de::Error),

    #[error("Message not found: {0}")]
    MessageNotFound(String),

    #[error("Invalid object ID: {0}")]
    InvalidObjectId(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PersistError {
    /// True when the error means the addressed record does not exist,
    /// including identifiers the backend could never have issued.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PersistError::MessageNotFound(_) | PersistError::InvalidObjectId(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PersistError>;
