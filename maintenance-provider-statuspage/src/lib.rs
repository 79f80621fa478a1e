//! Statuspage implementations of the incident repository.

pub mod client;
pub mod repository;
pub mod types;

pub use client::StatuspageClient;
pub use repository::{RestRepository, SimulateRepository, repository_for};
