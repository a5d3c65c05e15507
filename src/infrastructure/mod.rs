// src/infrastructure/mod.rs
pub mod config;
pub mod http;
pub mod json_db;
pub mod renderer;
pub mod server;

pub use config::Config;
pub use http::HttpCardStore;
pub use json_db::JsonDb;
pub use renderer::BrowserRenderer;
