//! Linkweave server: HTTP and CLI surface over the internal-linking analyzer.

pub mod cli;
pub mod routes;
pub mod state;

pub use state::AppState;
