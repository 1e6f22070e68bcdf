//! Applied-link graph for one organization, backed by petgraph.

use std::collections::HashMap;

use linkweave_core::Result;
use linkweave_store::{Article, ArticleStatus, ArticleStore, InternalLink, LinkStore};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::Serialize;
use tracing::debug;

/// Directed graph of applied links keyed by article id.
///
/// Parallel link rows for the same (source, target) pair collapse into one
/// edge, so degrees count distinct neighbours.
pub struct LinkGraph {
    graph: DiGraph<String, ()>,
    node_index: HashMap<String, NodeIndex>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_index: HashMap::new(),
        }
    }

    /// Build from applied links. Self-links are ignored.
    pub fn from_links<'a>(links: impl IntoIterator<Item = &'a InternalLink>) -> Self {
        let mut graph = Self::new();
        for link in links {
            graph.add_link(&link.source_article_id, &link.target_article_id);
        }
        graph
    }

    pub fn add_link(&mut self, source: &str, target: &str) {
        if source == target {
            return;
        }
        let s = self.node(source);
        let t = self.node(target);
        self.graph.update_edge(s, t, ());
    }

    fn node(&mut self, id: &str) -> NodeIndex {
        if let Some(idx) = self.node_index.get(id) {
            return *idx;
        }
        let idx = self.graph.add_node(id.to_string());
        self.node_index.insert(id.to_string(), idx);
        idx
    }

    /// Whether an applied `source → target` link exists.
    pub fn has_link(&self, source: &str, target: &str) -> bool {
        match (self.node_index.get(source), self.node_index.get(target)) {
            (Some(s), Some(t)) => self.graph.find_edge(*s, *t).is_some(),
            _ => false,
        }
    }

    /// Number of distinct articles with an applied link to `id`.
    pub fn inbound_degree(&self, id: &str) -> usize {
        self.node_index
            .get(id)
            .map(|idx| {
                self.graph
                    .neighbors_directed(*idx, Direction::Incoming)
                    .count()
            })
            .unwrap_or(0)
    }

    /// Get graph statistics.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            node_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
        }
    }
}

impl Default for LinkGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
}

/// Linkable articles, their applied links, and the resulting graph.
pub struct GraphSnapshot {
    pub articles: Vec<Article>,
    pub links: Vec<InternalLink>,
    pub graph: LinkGraph,
}

/// Load linkable articles and applied links for an org and build the graph.
///
/// An org with no articles yields an empty snapshot; store failures propagate.
pub fn build_link_graph<S>(store: &S, org_id: &str) -> Result<GraphSnapshot>
where
    S: ArticleStore + LinkStore,
{
    let articles = store.list_articles(org_id, &ArticleStatus::LINKABLE)?;
    let links = store.list_applied_links(org_id)?;
    let graph = LinkGraph::from_links(&links);

    let stats = graph.stats();
    debug!(
        "Link graph for org {}: {} articles, {} applied links, {} nodes, {} edges",
        org_id,
        articles.len(),
        links.len(),
        stats.node_count,
        stats.edge_count
    );

    Ok(GraphSnapshot {
        articles,
        links,
        graph,
    })
}

/// Density score 0–100 where 10% of all directed pairs linked scores 100.
pub fn link_density_score(linkable_articles: usize, applied_links: usize) -> u32 {
    let n = linkable_articles as f64;
    let total_possible = n * (n - 1.0);
    if total_possible <= 0.0 {
        return 0;
    }
    let score = (applied_links as f64 / (total_possible * 0.1) * 100.0).round();
    score.min(100.0) as u32
}
