// src/application/mod.rs
pub mod auth;
pub mod board;
pub mod notice;
pub mod repository;
pub mod route;

pub use auth::{AuthGate, CredentialVerifier, Credentials, SessionState};
pub use board::{BoardController, Mutation, PendingAdd};
pub use notice::{Notice, NoticeLevel, Notices};
pub use repository::CardRepository;
pub use route::{guard, Route};
