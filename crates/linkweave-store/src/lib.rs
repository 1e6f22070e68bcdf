//! Linkweave Store: articles and internal links in SQLite.
//!
//! The analyzer only talks to storage through the [`ArticleStore`] and
//! [`LinkStore`] traits; [`SqliteStore`] is the bundled implementation.

pub mod schema;
pub mod sqlite;
pub mod store;
pub mod tags;
pub mod types;

pub use sqlite::SqliteStore;
pub use store::{ArticleStore, LinkStore};
pub use tags::parse_tags;
pub use types::*;
