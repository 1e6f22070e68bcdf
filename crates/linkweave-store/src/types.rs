//! Data types for articles and internal links.

use serde::{Deserialize, Serialize};

/// Publication state of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    Draft,
    Scheduled,
    Published,
    Archived,
}

impl ArticleStatus {
    /// Statuses whose articles take part in the link graph.
    pub const LINKABLE: [ArticleStatus; 3] = [Self::Draft, Self::Scheduled, Self::Published];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Scheduled => "scheduled",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "scheduled" => Some(Self::Scheduled),
            "published" => Some(Self::Published),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

impl std::fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relationship an internal link expresses between two articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    PillarToCluster,
    ClusterToPillar,
    Related,
    Contextual,
}

impl LinkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PillarToCluster => "pillar_to_cluster",
            Self::ClusterToPillar => "cluster_to_pillar",
            Self::Related => "related",
            Self::Contextual => "contextual",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pillar_to_cluster" => Some(Self::PillarToCluster),
            "cluster_to_pillar" => Some(Self::ClusterToPillar),
            "related" => Some(Self::Related),
            "contextual" => Some(Self::Contextual),
            _ => None,
        }
    }
}

impl std::fmt::Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review state of an internal link. Only `Applied` links are part of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    Suggested,
    Applied,
    Rejected,
}

impl LinkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Suggested => "suggested",
            Self::Applied => "applied",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "suggested" => Some(Self::Suggested),
            "applied" => Some(Self::Applied),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An article row, scoped to one organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub org_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub tags: Vec<String>,
    pub word_count: u32,
    pub status: ArticleStatus,
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

/// A directed internal link between two articles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalLink {
    pub id: String,
    pub source_article_id: String,
    pub target_article_id: String,
    pub anchor_text: String,
    pub link_type: LinkType,
    pub status: LinkStatus,
    pub created_at: i64,
}

impl InternalLink {
    /// Build a freshly applied link with a new id and the current timestamp.
    pub fn applied(source: &str, target: &str, anchor_text: &str, link_type: LinkType) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            source_article_id: source.to_string(),
            target_article_id: target.to_string(),
            anchor_text: anchor_text.to_string(),
            link_type,
            status: LinkStatus::Applied,
            created_at: now_millis(),
        }
    }
}

/// Minimal projection used to build a link href.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugAndTitle {
    pub slug: String,
    pub title: String,
}

/// Options for adding an article.
#[derive(Debug, Clone, Default)]
pub struct NewArticle {
    /// Explicit id; a UUID is generated when absent.
    pub id: Option<String>,
    pub org_id: String,
    pub cluster_id: Option<String>,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub tags: Vec<String>,
    pub word_count: u32,
    /// Defaults to `Draft`.
    pub status: Option<ArticleStatus>,
    pub created_at: Option<i64>,
}

/// Store-level statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub total_articles: i64,
    pub published_articles: i64,
    pub total_links: i64,
    pub applied_links: i64,
    pub suggested_links: i64,
    pub rejected_links: i64,
    pub db_path: String,
    pub db_size_mb: f64,
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
