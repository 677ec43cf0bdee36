//! Zephyrus - A temperature sensor server
//!
//! Serves readings from a temperature sensor over HTTP, throttling device reads through a
//! TTL cache and streaming paced readings with retry on transient delivery failures.

pub mod api;
pub mod cache;
pub mod config;
pub mod device;
pub mod error;
pub mod models;
pub mod stream;

pub use api::AppState;
pub use config::Config;
pub use error::{Result, ZephyrusError};
