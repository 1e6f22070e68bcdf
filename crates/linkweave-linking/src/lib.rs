//! Internal-linking analyzer.
//!
//! Builds the applied-link graph of one organization, flags orphaned and
//! well-linked articles, ranks link suggestions (pillar/cluster and tag
//! overlap), rewrites anchor text into hyperlinks, and reports linking KPIs.
//! Every operation takes its store explicitly and rebuilds state per call.

pub mod analyzer;
pub mod anchor;
pub mod apply;
pub mod classify;
pub mod graph;
pub mod stats;
pub mod suggest;
pub mod types;

#[cfg(test)]
pub(crate) mod testutil;

pub use analyzer::{analyze_internal_links, get_article_link_suggestions};
pub use anchor::title_anchor;
pub use apply::{apply_internal_links, ApplyOptions};
pub use graph::{build_link_graph, link_density_score, GraphSnapshot, LinkGraph};
pub use stats::{detect_orphan_content, get_internal_linking_stats};
pub use types::*;
