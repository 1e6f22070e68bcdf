//! Shared fixtures for analyzer tests.

use linkweave_core::{Error, Result};
use linkweave_store::*;
use tempfile::TempDir;

pub const ORG: &str = "org-acme";

pub fn test_store() -> (SqliteStore, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = SqliteStore::open(dir.path()).unwrap();
    (store, dir)
}

/// In-memory article snapshot for pure-function tests.
pub fn article(id: &str, cluster: Option<&str>, tags: &[&str], word_count: u32) -> Article {
    Article {
        id: id.to_string(),
        org_id: ORG.to_string(),
        cluster_id: cluster.map(str::to_string),
        title: format!("Guide to {}", id),
        slug: id.to_string(),
        content: String::new(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        word_count,
        status: ArticleStatus::Published,
        created_at: 0,
        updated_at: None,
    }
}

/// Insert an article into the store. Equal timestamps keep insertion order.
pub fn seed_article(
    store: &SqliteStore,
    id: &str,
    cluster: Option<&str>,
    tags: &[&str],
    word_count: u32,
    status: ArticleStatus,
) {
    store
        .add_article(NewArticle {
            id: Some(id.to_string()),
            org_id: ORG.to_string(),
            cluster_id: cluster.map(str::to_string),
            title: format!("Guide to {}", id),
            slug: id.to_string(),
            content: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            word_count,
            status: Some(status),
            created_at: Some(1_000),
        })
        .unwrap();
}

pub fn applied(source: &str, target: &str) -> InternalLink {
    InternalLink::applied(source, target, "anchor", LinkType::Related)
}

/// A store whose backend is down.
pub struct DownStore;

fn down<T>() -> Result<T> {
    Err(Error::StoreUnavailable("connection refused".into()))
}

impl ArticleStore for DownStore {
    fn list_articles(&self, _org_id: &str, _statuses: &[ArticleStatus]) -> Result<Vec<Article>> {
        down()
    }

    fn get_article(&self, _article_id: &str) -> Result<Option<Article>> {
        down()
    }

    fn update_article_content(&self, _id: &str, _content: &str, _updated_at: i64) -> Result<()> {
        down()
    }

    fn get_slug_and_title(&self, _article_id: &str) -> Result<Option<SlugAndTitle>> {
        down()
    }
}

impl LinkStore for DownStore {
    fn list_applied_links(&self, _org_id: &str) -> Result<Vec<InternalLink>> {
        down()
    }

    fn list_links_from_source(&self, _article_id: &str) -> Result<Vec<InternalLink>> {
        down()
    }

    fn insert_link(&self, _link: &InternalLink) -> Result<()> {
        down()
    }
}
