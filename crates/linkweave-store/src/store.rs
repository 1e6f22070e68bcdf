//! Query interfaces the link analyzer is written against.
//!
//! Every analyzer operation takes its store as an explicit parameter bounded
//! by these traits. Implementations map backend failures to
//! `Error::StoreUnavailable`.

use linkweave_core::Result;

use crate::types::{Article, ArticleStatus, InternalLink, SlugAndTitle};

/// Read access to articles plus the single content write the applier needs.
pub trait ArticleStore {
    /// Articles of one organization whose status is in `statuses`, in store order.
    fn list_articles(&self, org_id: &str, statuses: &[ArticleStatus]) -> Result<Vec<Article>>;

    fn get_article(&self, article_id: &str) -> Result<Option<Article>>;

    /// Overwrite an article's content and stamp `updated_at` (epoch millis).
    fn update_article_content(&self, article_id: &str, content: &str, updated_at: i64)
        -> Result<()>;

    fn get_slug_and_title(&self, article_id: &str) -> Result<Option<SlugAndTitle>>;
}

/// Access to internal link records.
pub trait LinkStore {
    /// Applied links whose source article belongs to `org_id`.
    fn list_applied_links(&self, org_id: &str) -> Result<Vec<InternalLink>>;

    /// Every link row (any status) originating from one article.
    fn list_links_from_source(&self, article_id: &str) -> Result<Vec<InternalLink>>;

    fn insert_link(&self, link: &InternalLink) -> Result<()>;
}
