//! Configuration
//!
//! Layered configuration: built-in defaults, global file, project file, and
//! environment variables, merged with Figment.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{Config, OutputConfig};
