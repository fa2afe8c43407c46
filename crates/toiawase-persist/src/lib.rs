pub mod models;
pub mod filter;
pub mod trait_client;
pub mod error;
pub mod dbs;

pub use models::{DBMessage, NewMessage};
pub use filter::{parse_after, MessageFilter, MessageQuery};
pub use trait_client::MessageStore;
pub use error::PersistError;
pub use dbs::memory::MemoryMessageStore;

#[cfg(feature = "mongodb")]
pub use dbs::mongo::MongoMessageStore;
