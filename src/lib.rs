pub mod cache;
pub mod cli;
pub mod config;
pub mod generator;
pub mod i18n;
pub mod llm;
pub mod logging;
pub mod search;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use generator::workflow::launch;
