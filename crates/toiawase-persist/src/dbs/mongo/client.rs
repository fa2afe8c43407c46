use async_trait::async_trait;
use mongodb::{bson::doc, bson::oid::ObjectId, Client};

use crate::dbs::mongo::models::{filter_document, MongoMessage};
use crate::dbs::mongo::repositories::MongoMessageRepository;
use crate::error::{PersistError, Result};
use crate::filter::MessageFilter;
use crate::models::{DBMessage, NewMessage};
use crate::trait_client::MessageStore;

pub struct MongoMessageStore {
    client: Client,
    database: String,
    message_repo: MongoMessageRepository,
}

impl MongoMessageStore {
    /// Connect to MongoDB and create client
    pub async fn connect(mongodb_uri: &str, database: &str, collection: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        let message_repo = MongoMessageRepository::new(&client, database, collection);

        Ok(Self {
            client,
            database: database.to_string(),
            message_repo,
        })
    }
}

fn parse_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|e| PersistError::InvalidObjectId(e.to_string()))
}

#[async_trait]
impl MessageStore for MongoMessageStore {
    async fn insert_message(&self, message: NewMessage) -> Result<DBMessage> {
        let mongo_message: MongoMessage = message.into();
        self.message_repo.insert_message(&mongo_message).await?;
        Ok(mongo_message.into())
    }

    async fn list_messages(&self, filter: &MessageFilter) -> Result<Vec<DBMessage>> {
        let mongo_messages = self
            .message_repo
            .find_messages(filter_document(filter))
            .await?;
        Ok(mongo_messages.into_iter().map(|m| m.into()).collect())
    }

    async fn get_message(&self, id: &str) -> Result<Option<DBMessage>> {
        let object_id = parse_id(id)?;
        let mongo_message = self.message_repo.get_message(object_id).await?;
        Ok(mongo_message.map(|m| m.into()))
    }

    async fn update_message(&self, id: &str, name: &str, message: &str) -> Result<()> {
        let object_id = parse_id(id)?;
        let matched = self
            .message_repo
            .update_message(object_id, name, message)
            .await?;
        if matched == 0 {
            return Err(PersistError::MessageNotFound(id.to_string()));
        }
        Ok(())
    }

    async fn delete_message(&self, id: &str) -> Result<()> {
        let object_id = parse_id(id)?;
        let deleted = self.message_repo.delete_message(object_id).await?;
        if deleted == 0 {
            return Err(PersistError::MessageNotFound(id.to_string()));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}
