//! HTTP surface serving the flow API as JSON

pub mod handler;
pub mod server;

pub use server::{router, AppState, HttpServer};
