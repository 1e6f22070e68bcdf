//! Entry points used by the HTTP and CLI layers.

use std::collections::HashSet;

use linkweave_core::Result;
use linkweave_store::{ArticleStatus, ArticleStore, LinkStore};
use tracing::{debug, info};

use crate::classify::classify_articles;
use crate::graph::{build_link_graph, link_density_score};
use crate::suggest::{article_suggestions, generate_suggestions};
use crate::types::{LinkAnalysis, LinkSuggestion};

/// Full link-health report for one organization.
pub fn analyze_internal_links<S>(store: &S, org_id: &str) -> Result<LinkAnalysis>
where
    S: ArticleStore + LinkStore,
{
    let snapshot = build_link_graph(store, org_id)?;
    let health = classify_articles(&snapshot.articles, &snapshot.graph);
    let suggestions = generate_suggestions(&snapshot.articles, &snapshot.graph);
    let link_density_score = link_density_score(snapshot.articles.len(), snapshot.links.len());

    info!(
        "Link analysis for org {}: {} articles, {} orphans, {} well linked, {} suggestions, density={}",
        org_id,
        snapshot.articles.len(),
        health.orphans.len(),
        health.well_linked.len(),
        suggestions.len(),
        link_density_score
    );

    Ok(LinkAnalysis {
        orphan_articles: health.orphans,
        well_linked_articles: health.well_linked,
        suggestions,
        link_density_score,
    })
}

/// Up to ten ranked link targets for a single article. Unknown articles get
/// an empty list.
pub fn get_article_link_suggestions<S>(store: &S, article_id: &str) -> Result<Vec<LinkSuggestion>>
where
    S: ArticleStore + LinkStore,
{
    let Some(source) = store.get_article(article_id)? else {
        debug!("No suggestions: article {} not found", article_id);
        return Ok(Vec::new());
    };

    let existing = store.list_links_from_source(&source.id)?;
    let existing_targets: HashSet<&str> = existing
        .iter()
        .map(|l| l.target_article_id.as_str())
        .collect();
    let candidates = store.list_articles(&source.org_id, &ArticleStatus::LINKABLE)?;

    Ok(article_suggestions(&source, &candidates, &existing_targets))
}
