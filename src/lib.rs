pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod llm;
pub mod predict;
pub mod server;
pub mod wizard;

pub use error::{Error, Result};
