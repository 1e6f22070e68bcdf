//! SQLite-backed article and internal-link store.
//!
//! One connection behind a mutex; every call is a short, synchronous query.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::schema::SCHEMA_SQL;
use crate::store::{ArticleStore, LinkStore};
use crate::tags::parse_tags;
use crate::types::*;
use linkweave_core::{Error, Result};

/// SQLite store for articles and internal links.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl SqliteStore {
    /// Open or create the SQLite store.
    ///
    /// `db_dir` is the directory (e.g., `data/db/`). The file will be `db_dir/linkweave.db`.
    pub fn open(db_dir: impl AsRef<Path>) -> Result<Self> {
        let db_dir = db_dir.as_ref();
        std::fs::create_dir_all(db_dir)?;
        let db_path = db_dir.join("linkweave.db");

        let conn = Self::create_connection(&db_path)?;
        Self::init_schema(&conn)?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path,
        };

        info!(
            "SqliteStore initialized: {} articles, {} links, path={}",
            store.count_articles(None)?,
            store.count_links(None)?,
            store.db_path.display()
        );

        Ok(store)
    }

    fn create_connection(db_path: &Path) -> Result<Connection> {
        let conn = Connection::open(db_path)
            .map_err(|e| Error::StoreUnavailable(e.to_string()))?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA foreign_keys = ON;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(|e| Error::StoreUnavailable(e.to_string()))?;
        Ok(conn)
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| Error::StoreUnavailable(format!("Schema init failed: {}", e)))?;
        Ok(())
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    // ---------------------------------------------------------------
    // Article writes
    // ---------------------------------------------------------------

    /// Insert an article. Returns its id.
    pub fn add_article(&self, article: NewArticle) -> Result<String> {
        let id = article
            .id
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let now = article.created_at.unwrap_or_else(now_millis);
        let tags_json = serde_json::to_string(&article.tags)?;
        let status = article.status.unwrap_or(ArticleStatus::Draft);

        let conn = self.conn.lock();
        conn.prepare_cached(
            "INSERT INTO articles (id, org_id, cluster_id, title, slug, content, tags, \
             word_count, status, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .map_err(|e| Error::StoreUnavailable(e.to_string()))?
        .execute(params![
            id,
            article.org_id,
            article.cluster_id,
            article.title,
            article.slug,
            article.content,
            tags_json,
            article.word_count,
            status.as_str(),
            now,
        ])
        .map_err(|e| Error::StoreUnavailable(e.to_string()))?;
        Ok(id)
    }

    /// Count articles, optionally for a single organization.
    pub fn count_articles(&self, org_id: Option<&str>) -> Result<i64> {
        let conn = self.conn.lock();
        let count: i64 = match org_id {
            Some(org) => conn
                .query_row(
                    "SELECT COUNT(*) FROM articles WHERE org_id = ?1",
                    params![org],
                    |row| row.get(0),
                )
                .map_err(|e| Error::StoreUnavailable(e.to_string()))?,
            None => conn
                .query_row("SELECT COUNT(*) FROM articles", [], |row| row.get(0))
                .map_err(|e| Error::StoreUnavailable(e.to_string()))?,
        };
        Ok(count)
    }

    // ---------------------------------------------------------------
    // Link writes
    // ---------------------------------------------------------------

    /// Change the review status of a link. Returns false when the link does not exist.
    pub fn set_link_status(&self, link_id: &str, status: LinkStatus) -> Result<bool> {
        let conn = self.conn.lock();
        let count = conn
            .execute(
                "UPDATE internal_links SET status = ?1 WHERE id = ?2",
                params![status.as_str(), link_id],
            )
            .map_err(|e| Error::StoreUnavailable(e.to_string()))?;
        debug!("Link {} status -> {} ({} row)", link_id, status, count);
        Ok(count > 0)
    }

    /// Get a link by ID.
    pub fn get_link(&self, link_id: &str) -> Result<Option<InternalLink>> {
        let conn = self.conn.lock();
        let row = conn
            .prepare_cached("SELECT * FROM internal_links WHERE id = ?1")
            .map_err(|e| Error::StoreUnavailable(e.to_string()))?
            .query_row(params![link_id], |row| Ok(Self::row_to_link(row)))
            .optional()
            .map_err(|e| Error::StoreUnavailable(e.to_string()))?;
        Ok(row)
    }

    /// Count links, optionally restricted to one status.
    pub fn count_links(&self, status: Option<LinkStatus>) -> Result<i64> {
        let conn = self.conn.lock();
        let count: i64 = match status {
            Some(s) => conn
                .query_row(
                    "SELECT COUNT(*) FROM internal_links WHERE status = ?1",
                    params![s.as_str()],
                    |row| row.get(0),
                )
                .map_err(|e| Error::StoreUnavailable(e.to_string()))?,
            None => conn
                .query_row("SELECT COUNT(*) FROM internal_links", [], |row| row.get(0))
                .map_err(|e| Error::StoreUnavailable(e.to_string()))?,
        };
        Ok(count)
    }

    // ---------------------------------------------------------------
    // Stats
    // ---------------------------------------------------------------

    /// Get store statistics.
    pub fn get_stats(&self) -> Result<StoreStats> {
        let total_articles = self.count_articles(None)?;
        let total_links = self.count_links(None)?;
        let applied_links = self.count_links(Some(LinkStatus::Applied))?;
        let suggested_links = self.count_links(Some(LinkStatus::Suggested))?;
        let rejected_links = self.count_links(Some(LinkStatus::Rejected))?;

        let conn = self.conn.lock();
        let published_articles: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM articles WHERE status = 'published'",
                [],
                |row| row.get(0),
            )
            .map_err(|e| Error::StoreUnavailable(e.to_string()))?;
        drop(conn);

        let db_size = std::fs::metadata(&self.db_path)
            .map(|m| m.len())
            .unwrap_or(0);

        Ok(StoreStats {
            total_articles,
            published_articles,
            total_links,
            applied_links,
            suggested_links,
            rejected_links,
            db_path: self.db_path.to_string_lossy().to_string(),
            db_size_mb: db_size as f64 / (1024.0 * 1024.0),
        })
    }

    // ---------------------------------------------------------------
    // Row Mapping Helpers
    // ---------------------------------------------------------------

    fn row_to_article(row: &rusqlite::Row<'_>) -> Article {
        let status: String = row.get("status").unwrap_or_default();
        Article {
            id: row.get("id").unwrap_or_default(),
            org_id: row.get("org_id").unwrap_or_default(),
            cluster_id: row.get("cluster_id").ok().flatten(),
            title: row.get("title").unwrap_or_default(),
            slug: row.get("slug").unwrap_or_default(),
            content: row.get("content").unwrap_or_default(),
            tags: parse_tags(
                row.get::<_, Option<String>>("tags")
                    .ok()
                    .flatten()
                    .as_deref(),
            ),
            word_count: row.get("word_count").unwrap_or(0),
            status: ArticleStatus::parse(&status).unwrap_or(ArticleStatus::Archived),
            created_at: row.get("created_at").unwrap_or(0),
            updated_at: row.get("updated_at").ok().flatten(),
        }
    }

    fn row_to_link(row: &rusqlite::Row<'_>) -> InternalLink {
        let link_type: String = row.get("link_type").unwrap_or_default();
        let status: String = row.get("status").unwrap_or_default();
        InternalLink {
            id: row.get("id").unwrap_or_default(),
            source_article_id: row.get("source_article_id").unwrap_or_default(),
            target_article_id: row.get("target_article_id").unwrap_or_default(),
            anchor_text: row.get("anchor_text").unwrap_or_default(),
            link_type: LinkType::parse(&link_type).unwrap_or(LinkType::Contextual),
            status: LinkStatus::parse(&status).unwrap_or(LinkStatus::Suggested),
            created_at: row.get("created_at").unwrap_or(0),
        }
    }
}

impl ArticleStore for SqliteStore {
    fn list_articles(&self, org_id: &str, statuses: &[ArticleStatus]) -> Result<Vec<Article>> {
        if statuses.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders: Vec<String> = (0..statuses.len())
            .map(|i| format!("?{}", i + 2))
            .collect();
        let sql = format!(
            "SELECT * FROM articles WHERE org_id = ?1 AND status IN ({}) \
             ORDER BY created_at ASC, rowid ASC",
            placeholders.join(", ")
        );
        let mut values: Vec<&str> = Vec::with_capacity(statuses.len() + 1);
        values.push(org_id);
        values.extend(statuses.iter().map(|s| s.as_str()));

        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached(&sql)
            .map_err(|e| Error::StoreUnavailable(e.to_string()))?;
        let rows = stmt
            .query_map(params_from_iter(values), |row| Ok(Self::row_to_article(row)))
            .map_err(|e| Error::StoreUnavailable(e.to_string()))?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    fn get_article(&self, article_id: &str) -> Result<Option<Article>> {
        let conn = self.conn.lock();
        let row = conn
            .prepare_cached("SELECT * FROM articles WHERE id = ?1")
            .map_err(|e| Error::StoreUnavailable(e.to_string()))?
            .query_row(params![article_id], |row| Ok(Self::row_to_article(row)))
            .optional()
            .map_err(|e| Error::StoreUnavailable(e.to_string()))?;
        Ok(row)
    }

    fn update_article_content(
        &self,
        article_id: &str,
        content: &str,
        updated_at: i64,
    ) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute(
            "UPDATE articles SET content = ?1, updated_at = ?2 WHERE id = ?3",
            params![content, updated_at, article_id],
        )
        .map_err(|e| Error::StoreUnavailable(e.to_string()))?;
        Ok(())
    }

    fn get_slug_and_title(&self, article_id: &str) -> Result<Option<SlugAndTitle>> {
        let conn = self.conn.lock();
        let row = conn
            .prepare_cached("SELECT slug, title FROM articles WHERE id = ?1")
            .map_err(|e| Error::StoreUnavailable(e.to_string()))?
            .query_row(params![article_id], |row| {
                Ok(SlugAndTitle {
                    slug: row.get(0)?,
                    title: row.get(1)?,
                })
            })
            .optional()
            .map_err(|e| Error::StoreUnavailable(e.to_string()))?;
        Ok(row)
    }
}

impl LinkStore for SqliteStore {
    fn list_applied_links(&self, org_id: &str) -> Result<Vec<InternalLink>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached(
                "SELECT l.* FROM internal_links l \
                 JOIN articles a ON a.id = l.source_article_id \
                 WHERE a.org_id = ?1 AND l.status = 'applied' \
                 ORDER BY l.created_at ASC, l.rowid ASC",
            )
            .map_err(|e| Error::StoreUnavailable(e.to_string()))?;
        let rows = stmt
            .query_map(params![org_id], |row| Ok(Self::row_to_link(row)))
            .map_err(|e| Error::StoreUnavailable(e.to_string()))?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    fn list_links_from_source(&self, article_id: &str) -> Result<Vec<InternalLink>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached(
                "SELECT * FROM internal_links WHERE source_article_id = ?1 \
                 ORDER BY created_at ASC, rowid ASC",
            )
            .map_err(|e| Error::StoreUnavailable(e.to_string()))?;
        let rows = stmt
            .query_map(params![article_id], |row| Ok(Self::row_to_link(row)))
            .map_err(|e| Error::StoreUnavailable(e.to_string()))?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    fn insert_link(&self, link: &InternalLink) -> Result<()> {
        let conn = self.conn.lock();
        conn.prepare_cached(
            "INSERT INTO internal_links (id, source_article_id, target_article_id, \
             anchor_text, link_type, status, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .map_err(|e| Error::StoreUnavailable(e.to_string()))?
        .execute(params![
            link.id,
            link.source_article_id,
            link.target_article_id,
            link.anchor_text,
            link.link_type.as_str(),
            link.status.as_str(),
            link.created_at,
        ])
        .map_err(|e| Error::StoreUnavailable(e.to_string()))?;
        Ok(())
    }
}
