//! Database schema SQL.

/// Core tables: articles, internal_links.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS articles (
    id TEXT PRIMARY KEY,
    org_id TEXT NOT NULL,
    cluster_id TEXT,
    title TEXT NOT NULL,
    slug TEXT NOT NULL,
    content TEXT NOT NULL DEFAULT '',
    tags TEXT,
    word_count INTEGER NOT NULL DEFAULT 0,
    status TEXT NOT NULL DEFAULT 'draft',
    created_at INTEGER NOT NULL,
    updated_at INTEGER
);

CREATE INDEX IF NOT EXISTS idx_articles_org_status ON articles(org_id, status);
CREATE INDEX IF NOT EXISTS idx_articles_cluster ON articles(cluster_id);

CREATE TABLE IF NOT EXISTS internal_links (
    id TEXT PRIMARY KEY,
    source_article_id TEXT NOT NULL REFERENCES articles(id) ON DELETE CASCADE,
    target_article_id TEXT NOT NULL REFERENCES articles(id) ON DELETE CASCADE,
    anchor_text TEXT NOT NULL,
    link_type TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'suggested',
    created_at INTEGER NOT NULL,
    CHECK (source_article_id <> target_article_id)
);

CREATE INDEX IF NOT EXISTS idx_links_source ON internal_links(source_article_id);
CREATE INDEX IF NOT EXISTS idx_links_target ON internal_links(target_article_id);
CREATE INDEX IF NOT EXISTS idx_links_status ON internal_links(status);
"#;
