pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod repl;
pub mod speech;

pub use error::{Error, Result};
