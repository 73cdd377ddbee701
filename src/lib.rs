pub mod aggregate;
pub mod cascade;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod export;
pub mod loader;
pub mod state;
