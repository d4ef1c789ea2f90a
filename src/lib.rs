//! Minimal HTTP backend that answers every GET with a fixed text message.

pub mod config;
pub mod server;

pub use config::ServerConfig;
pub use server::{EchoServer, ServerError};
