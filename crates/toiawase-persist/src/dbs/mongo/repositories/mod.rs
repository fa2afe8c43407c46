pub mod message;

pub use message::MongoMessageRepository;
