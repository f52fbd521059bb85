//! Core application infrastructure

pub mod cli;
pub mod config;
pub mod constants;
pub mod shutdown;

pub use crate::app::CoreApp;
pub use cli::{CliConfig, Commands};
pub use config::{AppConfig, DatabaseConfig, QueryConfig, ServerConfig, StoreBackend};

// Re-export the store service from the data layer
pub use crate::data::KineticsService;

pub use shutdown::ShutdownService;
