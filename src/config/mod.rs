//! Configuration loading and management for the Vacation Engine.
//!
//! This module loads engine settings and versioned holiday calendars from
//! YAML files. Holiday data is read-only input to the engine.
//!
//! # Example
//!
//! ```no_run
//! use vacation_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Default jurisdiction: {}", config.settings().default_jurisdiction);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::EngineSettings;
