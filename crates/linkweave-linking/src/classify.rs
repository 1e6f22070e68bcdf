//! Orphan / well-linked classification.

use linkweave_store::Article;

use crate::graph::LinkGraph;

/// Inbound degree at which an article counts as well linked.
pub const WELL_LINKED_MIN_INBOUND: usize = 3;

/// Coarse link-health buckets. Articles with 1–2 inbound links fall in neither.
#[derive(Debug, Clone, Default)]
pub struct LinkHealth {
    pub orphans: Vec<Article>,
    pub well_linked: Vec<Article>,
}

/// Split articles into orphans (no inbound links) and well-linked (≥3 inbound),
/// keeping the input order.
pub fn classify_articles(articles: &[Article], graph: &LinkGraph) -> LinkHealth {
    let mut health = LinkHealth::default();
    for article in articles {
        match graph.inbound_degree(&article.id) {
            0 => health.orphans.push(article.clone()),
            n if n >= WELL_LINKED_MIN_INBOUND => health.well_linked.push(article.clone()),
            _ => {}
        }
    }
    health
}
