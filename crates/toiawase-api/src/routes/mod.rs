pub mod export;
pub mod form;
pub mod health;
pub mod messages;
