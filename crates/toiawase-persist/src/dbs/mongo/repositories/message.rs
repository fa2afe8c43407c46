use futures::TryStreamExt;
use mongodb::{bson::doc, bson::oid::ObjectId, bson::Document, Client, Collection};

use crate::dbs::mongo::models::MongoMessage;
use crate::error::Result;

#[derive(Clone)]
pub struct MongoMessageRepository {
    collection: Collection<MongoMessage>,
}

impl MongoMessageRepository {
    pub fn new(client: &Client, db_name: &str, collection_name: &str) -> Self {
        let collection = client.database(db_name).collection(collection_name);
        Self { collection }
    }

    /// Save a single message
    pub async fn insert_message(&self, message: &MongoMessage) -> Result<ObjectId> {
        self.collection.insert_one(message).await?;
        Ok(message.id)
    }

    /// Find messages matching a filter document, newest first
    pub async fn find_messages(&self, filter: Document) -> Result<Vec<MongoMessage>> {
        let messages = self
            .collection
            .find(filter)
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(messages)
    }

    /// Get message by ID
    pub async fn get_message(&self, id: ObjectId) -> Result<Option<MongoMessage>> {
        let filter = doc! { "_id": id };
        Ok(self.collection.find_one(filter).await?)
    }

    /// Set name and message; returns the number of matched documents
    pub async fn update_message(&self, id: ObjectId, name: &str, message: &str) -> Result<u64> {
        let filter = doc! { "_id": id };
        let update = doc! { "$set": { "name": name, "message": message } };
        let result = self.collection.update_one(filter, update).await?;
        Ok(result.matched_count)
    }

    /// Delete by ID; returns the number of deleted documents
    pub async fn delete_message(&self, id: ObjectId) -> Result<u64> {
        let filter = doc! { "_id": id };
        let result = self.collection.delete_one(filter).await?;
        Ok(result.deleted_count)
    }
}
