//! Link suggestion scoring.
//!
//! Two generators share the tag-overlap measure and title-derived anchors:
//! the org-wide pass (cluster pillar links plus cross-cluster "related"
//! pairs) and the per-article pass used while editing a single article.

use std::collections::{HashMap, HashSet};

use linkweave_store::{Article, LinkType};

use crate::anchor::title_anchor;
use crate::graph::LinkGraph;
use crate::types::LinkSuggestion;

/// Cap for the org-wide suggestion list.
pub const MAX_ORG_SUGGESTIONS: usize = 50;
/// Cap for per-article suggestions.
pub const MAX_ARTICLE_SUGGESTIONS: usize = 10;

const PILLAR_TO_CLUSTER_SCORE: u32 = 90;
const CLUSTER_TO_PILLAR_SCORE: u32 = 85;
const RELATED_MIN_OVERLAP: usize = 2;
const RELATED_BASE_SCORE: u32 = 50;
const RELATED_PER_TAG: u32 = 10;
const RELATED_MAX_SCORE: u32 = 80;

const ARTICLE_BASE_SCORE: u32 = 30;
const ARTICLE_PER_TAG: u32 = 15;
const SAME_CLUSTER_BOOST: u32 = 30;
const SAME_CLUSTER_MAX_SCORE: u32 = 95;
const ARTICLE_MIN_SCORE: u32 = 30;
const PILLAR_WORD_RATIO: f64 = 1.3;

/// Number of distinct tags two articles share.
pub fn tag_overlap(a: &[String], b: &[String]) -> usize {
    let a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let b: HashSet<&str> = b.iter().map(String::as_str).collect();
    a.intersection(&b).count()
}

fn same_cluster(a: &Article, b: &Article) -> bool {
    matches!((&a.cluster_id, &b.cluster_id), (Some(x), Some(y)) if x == y)
}

fn suggestion(source: &Article, target: &Article, score: u32, link_type: LinkType) -> LinkSuggestion {
    LinkSuggestion {
        source_article: source.clone(),
        target_article: target.clone(),
        suggested_anchor: title_anchor(&target.title),
        relevance_score: score,
        link_type,
    }
}

/// Group articles by cluster in order of first appearance.
fn clusters(articles: &[Article]) -> Vec<Vec<&Article>> {
    let mut order: Vec<Vec<&Article>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for article in articles {
        let Some(cluster_id) = article.cluster_id.as_deref() else {
            continue;
        };
        match index.get(cluster_id) {
            Some(&i) => order[i].push(article),
            None => {
                index.insert(cluster_id, order.len());
                order.push(vec![article]);
            }
        }
    }
    order
}

/// Longest member; the first one seen wins ties.
fn pillar_of<'a>(members: &[&'a Article]) -> Option<&'a Article> {
    let mut best: Option<&'a Article> = None;
    for &member in members {
        if best.map_or(true, |b| member.word_count > b.word_count) {
            best = Some(member);
        }
    }
    best
}

/// Pillar ↔ member links missing from the graph.
fn cluster_suggestions(articles: &[Article], graph: &LinkGraph) -> Vec<LinkSuggestion> {
    let mut out = Vec::new();
    for members in clusters(articles) {
        let Some(pillar) = pillar_of(&members) else {
            continue;
        };
        for member in members.iter().filter(|m| m.id != pillar.id) {
            if !graph.has_link(&pillar.id, &member.id) {
                out.push(suggestion(
                    pillar,
                    member,
                    PILLAR_TO_CLUSTER_SCORE,
                    LinkType::PillarToCluster,
                ));
            }
            if !graph.has_link(&member.id, &pillar.id) {
                out.push(suggestion(
                    member,
                    pillar,
                    CLUSTER_TO_PILLAR_SCORE,
                    LinkType::ClusterToPillar,
                ));
            }
        }
    }
    out
}

/// Tag-overlap links between articles outside a shared cluster, both directions.
fn related_suggestions(articles: &[Article], graph: &LinkGraph) -> Vec<LinkSuggestion> {
    let mut out = Vec::new();
    for (i, a) in articles.iter().enumerate() {
        for b in &articles[i + 1..] {
            if a.id == b.id || same_cluster(a, b) {
                continue;
            }
            if graph.has_link(&a.id, &b.id) || graph.has_link(&b.id, &a.id) {
                continue;
            }
            let overlap = tag_overlap(&a.tags, &b.tags);
            if overlap < RELATED_MIN_OVERLAP {
                continue;
            }
            let score =
                (RELATED_BASE_SCORE + overlap as u32 * RELATED_PER_TAG).min(RELATED_MAX_SCORE);
            out.push(suggestion(a, b, score, LinkType::Related));
            out.push(suggestion(b, a, score, LinkType::Related));
        }
    }
    out
}

/// Org-wide ranked suggestions: cluster pass, then cross-cluster pass,
/// stable-sorted by score and capped at 50.
pub fn generate_suggestions(articles: &[Article], graph: &LinkGraph) -> Vec<LinkSuggestion> {
    let mut suggestions = cluster_suggestions(articles, graph);
    suggestions.extend(related_suggestions(articles, graph));
    rank(suggestions, MAX_ORG_SUGGESTIONS)
}

/// Suggestions from `source` to each candidate not already in `existing_targets`.
pub fn article_suggestions(
    source: &Article,
    candidates: &[Article],
    existing_targets: &HashSet<&str>,
) -> Vec<LinkSuggestion> {
    let suggestions = candidates
        .iter()
        .filter(|c| c.id != source.id && !existing_targets.contains(c.id.as_str()))
        .map(|target| {
            let overlap = tag_overlap(&source.tags, &target.tags) as u32;
            let base = ARTICLE_BASE_SCORE + overlap * ARTICLE_PER_TAG;
            let (score, link_type) = if same_cluster(source, target) {
                let src = source.word_count as f64;
                let tgt = target.word_count as f64;
                let link_type = if src > tgt * PILLAR_WORD_RATIO {
                    LinkType::PillarToCluster
                } else if tgt > src * PILLAR_WORD_RATIO {
                    LinkType::ClusterToPillar
                } else {
                    LinkType::Related
                };
                ((base + SAME_CLUSTER_BOOST).min(SAME_CLUSTER_MAX_SCORE), link_type)
            } else if overlap as usize >= RELATED_MIN_OVERLAP {
                (base, LinkType::Related)
            } else {
                (base, LinkType::Contextual)
            };
            suggestion(source, target, score, link_type)
        })
        .filter(|s| s.relevance_score >= ARTICLE_MIN_SCORE)
        .collect();
    rank(suggestions, MAX_ARTICLE_SUGGESTIONS)
}

fn rank(mut suggestions: Vec<LinkSuggestion>, limit: usize) -> Vec<LinkSuggestion> {
    // sort_by is stable: equal scores keep generation order.
    suggestions.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    suggestions.truncate(limit);
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{applied, article};

    fn pairs(suggestions: &[LinkSuggestion]) -> Vec<(&str, &str, u32)> {
        suggestions
            .iter()
            .map(|s| {
                (
                    s.source_article.id.as_str(),
                    s.target_article.id.as_str(),
                    s.relevance_score,
                )
            })
            .collect()
    }

    #[test]
    fn test_tag_overlap_counts_distinct() {
        let a: Vec<String> = vec!["seo".into(), "saas".into(), "seo".into()];
        let b: Vec<String> = vec!["seo".into(), "saas".into(), "pricing".into()];
        assert_eq!(tag_overlap(&a, &b), 2);
        assert_eq!(tag_overlap(&a, &[]), 0);
    }

    #[test]
    fn test_pillar_is_longest_first_on_ties() {
        let a = article("a", Some("c"), &[], 800);
        let b = article("b", Some("c"), &[], 2400);
        let c = article("c", Some("c"), &[], 2400);
        assert_eq!(pillar_of(&[&a, &b, &c]).unwrap().id, "b");
        assert!(pillar_of(&[]).is_none());
    }

    #[test]
    fn test_cluster_pass_scores() {
        let articles = vec![
            article("short", Some("seo"), &[], 800),
            article("pillar", Some("seo"), &[], 2400),
            article("mid", Some("seo"), &[], 1200),
        ];
        let suggestions = generate_suggestions(&articles, &LinkGraph::new());
        assert_eq!(
            pairs(&suggestions),
            vec![
                ("pillar", "short", 90),
                ("pillar", "mid", 90),
                ("short", "pillar", 85),
                ("mid", "pillar", 85),
            ]
        );
        assert_eq!(suggestions[0].link_type, LinkType::PillarToCluster);
        assert_eq!(suggestions[0].suggested_anchor, "Guide to short");
        assert_eq!(suggestions[2].link_type, LinkType::ClusterToPillar);
        assert_eq!(suggestions[2].suggested_anchor, "Guide to pillar");
    }

    #[test]
    fn test_existing_links_suppress_suggestions() {
        let articles = vec![
            article("pillar", Some("seo"), &[], 2400),
            article("member", Some("seo"), &[], 800),
        ];
        let graph = LinkGraph::from_links(&[applied("pillar", "member")]);
        let suggestions = generate_suggestions(&articles, &graph);
        assert_eq!(pairs(&suggestions), vec![("member", "pillar", 85)]);
    }

    #[test]
    fn test_related_tag_overlap() {
        let articles = vec![
            article("a", Some("one"), &["seo", "saas", "growth"], 1000),
            article("b", Some("two"), &["seo", "saas", "pricing"], 1000),
        ];
        let suggestions = generate_suggestions(&articles, &LinkGraph::new());
        assert_eq!(pairs(&suggestions), vec![("a", "b", 70), ("b", "a", 70)]);
        assert!(suggestions.iter().all(|s| s.link_type == LinkType::Related));
    }

    #[test]
    fn test_related_score_capped_at_80() {
        let tags = ["a", "b", "c", "d", "e"];
        let articles = vec![article("x", None, &tags, 1000), article("y", None, &tags, 1000)];
        let suggestions = generate_suggestions(&articles, &LinkGraph::new());
        assert!(suggestions.iter().all(|s| s.relevance_score == 80));
    }

    #[test]
    fn test_related_requires_two_tags_and_no_link_either_way() {
        let articles = vec![
            article("a", None, &["seo", "saas"], 1000),
            article("b", None, &["seo", "saas"], 1000),
            article("c", None, &["seo"], 1000),
        ];
        let graph = LinkGraph::from_links(&[applied("b", "a")]);
        assert!(generate_suggestions(&articles, &graph).is_empty());
    }

    #[test]
    fn test_same_cluster_pairs_skip_related_pass() {
        let articles = vec![
            article("p", Some("k"), &["seo", "saas"], 3000),
            article("m", Some("k"), &["seo", "saas"], 1000),
        ];
        let suggestions = generate_suggestions(&articles, &LinkGraph::new());
        assert!(suggestions.iter().all(|s| s.link_type != LinkType::Related));
        assert_eq!(suggestions.len(), 2);
    }

    #[test]
    fn test_org_suggestions_capped_and_sorted() {
        let tags = ["seo", "saas", "growth"];
        let articles: Vec<Article> = (0..12)
            .map(|i| article(&format!("a{}", i), None, &tags, 1000))
            .collect();
        let suggestions = generate_suggestions(&articles, &LinkGraph::new());
        assert_eq!(suggestions.len(), MAX_ORG_SUGGESTIONS);
        assert!(suggestions
            .windows(2)
            .all(|w| w[0].relevance_score >= w[1].relevance_score));
    }

    #[test]
    fn test_article_suggestions_scoring() {
        let source = article("src", Some("k"), &["seo", "saas"], 3000);
        let candidates = vec![
            source.clone(),
            article("member", Some("k"), &["seo"], 1000),
            article("big", Some("k"), &[], 5000),
            article("peer", Some("k"), &["seo", "saas"], 2800),
            article("tagged", None, &["seo", "saas"], 1000),
            article("loose", None, &["pricing"], 1000),
        ];
        let suggestions = article_suggestions(&source, &candidates, &HashSet::new());
        let got: Vec<(&str, u32, LinkType)> = suggestions
            .iter()
            .map(|s| (s.target_article.id.as_str(), s.relevance_score, s.link_type))
            .collect();
        assert_eq!(
            got,
            vec![
                // 30 + 2*15 + 30 = 90
                ("peer", 90, LinkType::Related),
                // 30 + 15 + 30 = 75
                ("member", 75, LinkType::PillarToCluster),
                // ties keep candidate order
                ("big", 60, LinkType::ClusterToPillar),
                ("tagged", 60, LinkType::Related),
                ("loose", 30, LinkType::Contextual),
            ]
        );
    }

    #[test]
    fn test_article_suggestions_cluster_clamp() {
        let tags = ["a", "b", "c", "d"];
        let source = article("s", Some("k"), &tags, 1000);
        let candidates = vec![
            article("three", Some("k"), &tags[..3], 1000),
            article("four", Some("k"), &tags, 1000),
        ];
        let suggestions = article_suggestions(&source, &candidates, &HashSet::new());
        assert!(suggestions.iter().all(|s| s.relevance_score == 95));
        // Equal scores keep candidate order.
        assert_eq!(suggestions[0].target_article.id, "three");
    }

    #[test]
    fn test_article_suggestions_skip_existing_and_cap() {
        let source = article("s", None, &[], 1000);
        let candidates: Vec<Article> = (0..15)
            .map(|i| article(&format!("c{}", i), None, &[], 1000))
            .collect();
        let existing: HashSet<&str> = HashSet::from(["c0", "c1"]);
        let suggestions = article_suggestions(&source, &candidates, &existing);
        assert_eq!(suggestions.len(), MAX_ARTICLE_SUGGESTIONS);
        assert!(suggestions
            .iter()
            .all(|s| s.target_article.id != "c0" && s.target_article.id != "c1"));
        assert_eq!(suggestions[0].target_article.id, "c2");
    }
}
