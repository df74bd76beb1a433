pub mod account;
pub mod chat;
pub mod deck;
pub mod profile;
pub mod settings;
pub mod utils;
