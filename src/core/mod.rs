pub mod error;
pub mod types;
pub mod config;
pub mod stats;
