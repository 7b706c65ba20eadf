pub mod api;
pub mod cache;
pub mod config;
pub mod dialect;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod provider;
pub mod scan;
pub mod task;
