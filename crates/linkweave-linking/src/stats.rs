//! Organization-wide internal linking KPIs.

use std::collections::{HashMap, HashSet};

use linkweave_core::Result;
use linkweave_store::{Article, ArticleStatus, ArticleStore, LinkStore};

use crate::types::{LinkingStats, TopLinkedArticle};

const TOP_LINKED_LIMIT: usize = 5;

/// Link totals, average links per published article, published orphans and
/// the five most-linked published articles.
pub fn get_internal_linking_stats<S>(store: &S, org_id: &str) -> Result<LinkingStats>
where
    S: ArticleStore + LinkStore,
{
    let published = store.list_articles(org_id, &[ArticleStatus::Published])?;
    let links = store.list_applied_links(org_id)?;

    let mut inbound: HashMap<&str, usize> = HashMap::new();
    for link in &links {
        *inbound.entry(link.target_article_id.as_str()).or_default() += 1;
    }
    let inbound_of = |a: &Article| inbound.get(a.id.as_str()).copied().unwrap_or(0);

    let total_links = links.len();
    let avg = total_links as f64 / published.len().max(1) as f64;
    let orphan_count = published.iter().filter(|&a| inbound_of(a) == 0).count();

    let mut ranked: Vec<(&Article, usize)> =
        published.iter().map(|a| (a, inbound_of(a))).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    let top_linked_articles = ranked
        .into_iter()
        .take(TOP_LINKED_LIMIT)
        .map(|(a, count)| TopLinkedArticle {
            id: a.id.clone(),
            title: a.title.clone(),
            slug: a.slug.clone(),
            inbound_links: count,
        })
        .collect();

    Ok(LinkingStats {
        total_links,
        avg_links_per_article: (avg * 10.0).round() / 10.0,
        orphan_count,
        top_linked_articles,
    })
}

/// Published articles with no applied inbound links, in store order.
pub fn detect_orphan_content<S>(store: &S, org_id: &str) -> Result<Vec<Article>>
where
    S: ArticleStore + LinkStore,
{
    let published = store.list_articles(org_id, &[ArticleStatus::Published])?;
    let links = store.list_applied_links(org_id)?;
    let linked: HashSet<&str> = links.iter().map(|l| l.target_article_id.as_str()).collect();

    Ok(published
        .into_iter()
        .filter(|a| !linked.contains(a.id.as_str()))
        .collect())
}
