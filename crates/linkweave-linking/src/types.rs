//! Analyzer result types.

use linkweave_store::{Article, LinkType};
use serde::{Deserialize, Serialize};

/// A candidate link, computed per request and never stored until applied.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSuggestion {
    pub source_article: Article,
    pub target_article: Article,
    pub suggested_anchor: String,
    /// 0–100.
    pub relevance_score: u32,
    pub link_type: LinkType,
}

/// Org-wide link health report.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkAnalysis {
    pub orphan_articles: Vec<Article>,
    pub well_linked_articles: Vec<Article>,
    pub suggestions: Vec<LinkSuggestion>,
    pub link_density_score: u32,
}

/// One requested link application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkInstruction {
    pub target_article_id: String,
    pub anchor_text: String,
    pub link_type: LinkType,
}

/// What happened to a single [`LinkInstruction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyOutcome {
    Applied,
    /// Target article missing (or the instruction pointed back at the source).
    SkippedNotFound,
    /// No linkable occurrence of the anchor text in the content.
    SkippedNoMatch,
}

/// Result of applying a batch of link instructions to one article.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyLinksResult {
    pub success: bool,
    pub applied_count: usize,
    pub updated_content: String,
    pub outcomes: Vec<ApplyOutcome>,
}

impl ApplyLinksResult {
    pub fn not_found() -> Self {
        Self {
            success: false,
            applied_count: 0,
            updated_content: String::new(),
            outcomes: Vec::new(),
        }
    }
}

/// An article ranked by inbound applied links.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopLinkedArticle {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub inbound_links: usize,
}

/// Organization-wide internal linking KPIs.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkingStats {
    pub total_links: usize,
    pub avg_links_per_article: f64,
    pub orphan_count: usize,
    pub top_linked_articles: Vec<TopLinkedArticle>,
}
