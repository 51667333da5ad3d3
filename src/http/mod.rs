//! HTTP API over a built graph document

pub mod handler;
pub mod server;

pub use server::{router, AppState, HttpServer};
