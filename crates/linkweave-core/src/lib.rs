//! Linkweave Core: error taxonomy, configuration, data directories.

pub mod config;
pub mod error;

pub use config::{DataPaths, LinkweaveConfig};
pub use error::{Error, Result};
