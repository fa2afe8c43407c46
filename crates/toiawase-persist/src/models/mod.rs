mod db_message;

// Export database-agnostic models
pub use db_message::{DBMessage, NewMessage};
