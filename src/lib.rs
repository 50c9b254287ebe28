pub mod config;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod prompt;
pub mod providers;
pub mod schema;
pub mod server;
pub mod types;
