//! Link application: turn anchor-text occurrences into hyperlinks.
//!
//! Instructions are applied in order against an accumulated copy of the
//! content, so later instructions see the anchors earlier ones inserted.
//! Misses are per-instruction outcomes, not errors. The read-modify-write on
//! `content` is not guarded here; callers keep one writer per article.

use linkweave_core::config::DEFAULT_BLOG_PATH;
use linkweave_core::Result;
use linkweave_store::{now_millis, ArticleStore, InternalLink, LinkStore, SlugAndTitle};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use crate::types::{ApplyLinksResult, ApplyOutcome, LinkInstruction};

static OPEN_ANCHOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<a[\s>]").unwrap());
static CLOSE_ANCHOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</a\s*>").unwrap());
static CLOSE_ANCHOR_AHEAD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[^<]*</a\s*>").unwrap());

/// Settings for building link markup.
#[derive(Debug, Clone)]
pub struct ApplyOptions {
    /// Path prefix for article URLs, without trailing slash.
    pub blog_path: String,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            blog_path: DEFAULT_BLOG_PATH.to_string(),
        }
    }
}

/// Apply link instructions to an article's content and persist the result.
///
/// A missing source article is reported as `success: false`. Each applied
/// instruction inserts an `applied` link row; the content is written back
/// once, and only if at least one link was applied.
///
/// The batch is not atomic. Link rows are inserted as each instruction
/// applies, so a store error later in the batch (or in the final content
/// write) leaves those rows behind while the stored content keeps its old
/// text.
pub fn apply_internal_links<S>(
    store: &S,
    article_id: &str,
    instructions: &[LinkInstruction],
    options: &ApplyOptions,
) -> Result<ApplyLinksResult>
where
    S: ArticleStore + LinkStore,
{
    let Some(source) = store.get_article(article_id)? else {
        debug!("apply_internal_links: article {} not found", article_id);
        return Ok(ApplyLinksResult::not_found());
    };

    let (content, outcomes) = instructions.iter().try_fold(
        (source.content, Vec::with_capacity(instructions.len())),
        |(content, mut outcomes), instruction| -> Result<_> {
            let (content, outcome) =
                apply_instruction(store, &source.id, content, instruction, options)?;
            outcomes.push(outcome);
            Ok((content, outcomes))
        },
    )?;

    let applied_count = outcomes
        .iter()
        .filter(|o| **o == ApplyOutcome::Applied)
        .count();

    if applied_count > 0 {
        store.update_article_content(&source.id, &content, now_millis())?;
    }

    info!(
        "Applied {}/{} internal links to article {}",
        applied_count,
        instructions.len(),
        source.id
    );

    Ok(ApplyLinksResult {
        success: true,
        applied_count,
        updated_content: content,
        outcomes,
    })
}

fn apply_instruction<S>(
    store: &S,
    source_id: &str,
    content: String,
    instruction: &LinkInstruction,
    options: &ApplyOptions,
) -> Result<(String, ApplyOutcome)>
where
    S: ArticleStore + LinkStore,
{
    if instruction.target_article_id == source_id {
        debug!("Skipping self-link on article {}", source_id);
        return Ok((content, ApplyOutcome::SkippedNotFound));
    }

    let Some(target) = store.get_slug_and_title(&instruction.target_article_id)? else {
        debug!(
            "Skipping link to missing article {}",
            instruction.target_article_id
        );
        return Ok((content, ApplyOutcome::SkippedNotFound));
    };

    let Some((start, end)) = find_link_position(&content, &instruction.anchor_text) else {
        debug!(
            "Anchor '{}' not linkable in article {}",
            instruction.anchor_text, source_id
        );
        return Ok((content, ApplyOutcome::SkippedNoMatch));
    };

    let html = link_html(&target, &instruction.anchor_text, options);
    let updated = format!("{}{}{}", &content[..start], html, &content[end..]);

    store.insert_link(&InternalLink::applied(
        source_id,
        &instruction.target_article_id,
        &instruction.anchor_text,
        instruction.link_type,
    ))?;

    Ok((updated, ApplyOutcome::Applied))
}

/// Byte range of the first whole-word, case-insensitive occurrence of
/// `anchor_text` that sits in plain text: not inside a tag, not inside an
/// `<a>` element, and not followed by `</a>` before the next tag.
pub fn find_link_position(content: &str, anchor_text: &str) -> Option<(usize, usize)> {
    let anchor = anchor_text.trim();
    if anchor.is_empty() {
        return None;
    }
    let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(anchor))).ok()?;

    let found = pattern
        .find_iter(content)
        .find(|m| {
            let before = &content[..m.start()];
            let after = &content[m.end()..];
            !inside_tag(before) && !inside_anchor(before) && !CLOSE_ANCHOR_AHEAD_RE.is_match(after)
        })
        .map(|m| (m.start(), m.end()));
    found
}

/// An unterminated `<` means we are inside a tag's attributes.
fn inside_tag(before: &str) -> bool {
    match before.rfind('<') {
        Some(lt) => !before[lt..].contains('>'),
        None => false,
    }
}

fn inside_anchor(before: &str) -> bool {
    let last_open = OPEN_ANCHOR_RE.find_iter(before).last().map(|m| m.start());
    let last_close = CLOSE_ANCHOR_RE.find_iter(before).last().map(|m| m.start());
    match (last_open, last_close) {
        (Some(open), Some(close)) => open > close,
        (Some(_), None) => true,
        _ => false,
    }
}

fn link_html(target: &SlugAndTitle, anchor_text: &str, options: &ApplyOptions) -> String {
    format!(
        r#"<a href="{}/{}" title="{}">{}</a>"#,
        options.blog_path,
        escape_attr(&target.slug),
        escape_attr(&target.title),
        anchor_text
    )
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{seed_article, test_store, DownStore, ORG};
    use linkweave_core::Error;
    use linkweave_store::{ArticleStatus, LinkStatus, LinkType, NewArticle, SqliteStore};

    fn seed_source(store: &SqliteStore, content: &str) {
        store
            .add_article(NewArticle {
                id: Some("src".into()),
                org_id: ORG.into(),
                title: "Source".into(),
                slug: "source".into(),
                content: content.into(),
                word_count: 1500,
                status: Some(ArticleStatus::Published),
                ..Default::default()
            })
            .unwrap();
    }

    fn instruction(target: &str, anchor: &str) -> LinkInstruction {
        LinkInstruction {
            target_article_id: target.into(),
            anchor_text: anchor.into(),
            link_type: LinkType::Related,
        }
    }

    #[test]
    fn test_find_position_plain_text() {
        let content = "<p>Start with keyword research today.</p>";
        let (s, e) = find_link_position(content, "Keyword Research").unwrap();
        assert_eq!(&content[s..e], "keyword research");
    }

    #[test]
    fn test_find_position_whole_word_only() {
        assert!(find_link_position("<p>growthhacking tips</p>", "growth").is_none());
        assert!(find_link_position("<p>regrowth</p>", "growth").is_none());
        assert!(find_link_position("<p>growth, tips</p>", "growth").is_some());
    }

    #[test]
    fn test_find_position_skips_existing_anchor_and_attributes() {
        let content = r#"<p><img alt="seo guide"> See <a href="/blog/x">the seo guide</a>; this seo guide too.</p>"#;
        let (s, _) = find_link_position(content, "seo guide").unwrap();
        assert!(content[..s].ends_with("this "));
    }

    #[test]
    fn test_find_position_skips_text_before_closing_anchor() {
        // Unbalanced markup: text directly followed by </a> counts as linked.
        assert!(find_link_position("<p>pricing tips</a></p>", "pricing tips").is_none());
    }

    #[test]
    fn test_find_position_escapes_regex_chars() {
        let content = "<p>Is C++ (really) hard?</p>";
        assert!(find_link_position(content, "(really)").is_none());
        assert!(find_link_position(content, "really").is_some());
        assert!(find_link_position(content, "").is_none());
    }

    #[test]
    fn test_source_not_found() {
        let (store, _dir) = test_store();
        let result =
            apply_internal_links(&store, "missing", &[instruction("x", "y")], &ApplyOptions::default())
                .unwrap();
        assert!(!result.success);
        assert_eq!(result.applied_count, 0);
    }

    #[test]
    fn test_two_links_applied() {
        let (store, _dir) = test_store();
        seed_source(
            &store,
            "<p>Good keyword research feeds content briefs and link building.</p>",
        );
        seed_article(&store, "kw", None, &[], 2000, ArticleStatus::Published);
        seed_article(&store, "lb", None, &[], 2000, ArticleStatus::Published);

        let result = apply_internal_links(
            &store,
            "src",
            &[
                instruction("kw", "keyword research"),
                instruction("lb", "link building"),
            ],
            &ApplyOptions::default(),
        )
        .unwrap();

        assert!(result.success);
        assert_eq!(result.applied_count, 2);
        assert_eq!(result.updated_content.matches("<a ").count(), 2);
        assert!(result
            .updated_content
            .contains(r#"<a href="/blog/kw" title="Guide to kw">keyword research</a>"#));
        assert_eq!(result.outcomes, vec![ApplyOutcome::Applied, ApplyOutcome::Applied]);

        let stored = store.get_article("src").unwrap().unwrap();
        assert_eq!(stored.content, result.updated_content);
        assert!(stored.updated_at.is_some());

        let links = store.list_links_from_source("src").unwrap();
        assert_eq!(links.len(), 2);
        assert!(links.iter().all(|l| l.status == LinkStatus::Applied));
        assert_eq!(links[0].anchor_text, "keyword research");
    }

    #[test]
    fn test_unmatched_anchor_persists_nothing() {
        let (store, _dir) = test_store();
        let original = "<p>Nothing relevant here.</p>";
        seed_source(&store, original);
        seed_article(&store, "kw", None, &[], 2000, ArticleStatus::Published);

        let result = apply_internal_links(
            &store,
            "src",
            &[instruction("kw", "keyword research")],
            &ApplyOptions::default(),
        )
        .unwrap();

        assert!(result.success);
        assert_eq!(result.applied_count, 0);
        assert_eq!(result.updated_content, original);
        assert_eq!(result.outcomes, vec![ApplyOutcome::SkippedNoMatch]);
        assert!(store.list_links_from_source("src").unwrap().is_empty());
        assert!(store.get_article("src").unwrap().unwrap().updated_at.is_none());
    }

    #[test]
    fn test_missing_target_skipped_batch_continues() {
        let (store, _dir) = test_store();
        seed_source(&store, "<p>Read about churn and retention.</p>");
        seed_article(&store, "ret", None, &[], 2000, ArticleStatus::Published);

        let result = apply_internal_links(
            &store,
            "src",
            &[
                instruction("ghost", "churn"),
                instruction("src", "Read"),
                instruction("ret", "retention"),
            ],
            &ApplyOptions::default(),
        )
        .unwrap();

        assert_eq!(result.applied_count, 1);
        assert_eq!(
            result.outcomes,
            vec![
                ApplyOutcome::SkippedNotFound,
                ApplyOutcome::SkippedNotFound,
                ApplyOutcome::Applied
            ]
        );
        assert!(result.updated_content.contains("churn and <a href"));
    }

    #[test]
    fn test_later_instructions_see_earlier_edits() {
        let (store, _dir) = test_store();
        seed_source(&store, "<p>Our SEO checklist.</p>");
        seed_article(&store, "a", None, &[], 2000, ArticleStatus::Published);
        seed_article(&store, "b", None, &[], 2000, ArticleStatus::Published);

        let result = apply_internal_links(
            &store,
            "src",
            &[instruction("a", "seo checklist"), instruction("b", "SEO")],
            &ApplyOptions::default(),
        )
        .unwrap();

        assert_eq!(result.applied_count, 1);
        assert_eq!(
            result.outcomes,
            vec![ApplyOutcome::Applied, ApplyOutcome::SkippedNoMatch]
        );
        assert_eq!(store.list_links_from_source("src").unwrap().len(), 1);
    }

    #[test]
    fn test_custom_blog_path_and_title_escaping() {
        let (store, _dir) = test_store();
        seed_source(&store, "<p>See the pricing teardown.</p>");
        store
            .add_article(NewArticle {
                id: Some("p".into()),
                org_id: ORG.into(),
                title: r#"Pricing "Teardown" & Review"#.into(),
                slug: "pricing-teardown".into(),
                ..Default::default()
            })
            .unwrap();

        let options = ApplyOptions {
            blog_path: "/resources".into(),
        };
        let result =
            apply_internal_links(&store, "src", &[instruction("p", "pricing teardown")], &options)
                .unwrap();
        assert!(result.updated_content.contains(
            r#"<a href="/resources/pricing-teardown" title="Pricing &quot;Teardown&quot; &amp; Review">pricing teardown</a>"#
        ));
    }

    /// Delegates to a real store but fails the content write.
    struct ContentWriteFails<'a>(&'a SqliteStore);

    impl ArticleStore for ContentWriteFails<'_> {
        fn list_articles(
            &self,
            org_id: &str,
            statuses: &[ArticleStatus],
        ) -> Result<Vec<linkweave_store::Article>> {
            self.0.list_articles(org_id, statuses)
        }

        fn get_article(&self, article_id: &str) -> Result<Option<linkweave_store::Article>> {
            self.0.get_article(article_id)
        }

        fn update_article_content(&self, _id: &str, _content: &str, _updated_at: i64) -> Result<()> {
            Err(Error::StoreUnavailable("write failed".into()))
        }

        fn get_slug_and_title(&self, article_id: &str) -> Result<Option<SlugAndTitle>> {
            self.0.get_slug_and_title(article_id)
        }
    }

    impl LinkStore for ContentWriteFails<'_> {
        fn list_applied_links(&self, org_id: &str) -> Result<Vec<InternalLink>> {
            self.0.list_applied_links(org_id)
        }

        fn list_links_from_source(&self, article_id: &str) -> Result<Vec<InternalLink>> {
            self.0.list_links_from_source(article_id)
        }

        fn insert_link(&self, link: &InternalLink) -> Result<()> {
            self.0.insert_link(link)
        }
    }

    #[test]
    fn test_failed_content_write_keeps_inserted_rows() {
        let (store, _dir) = test_store();
        let original = "<p>Start with keyword research.</p>";
        seed_source(&store, original);
        seed_article(&store, "kw", None, &[], 2000, ArticleStatus::Published);

        let err = apply_internal_links(
            &ContentWriteFails(&store),
            "src",
            &[instruction("kw", "keyword research")],
            &ApplyOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::StoreUnavailable(_)));

        assert_eq!(store.get_article("src").unwrap().unwrap().content, original);
        assert_eq!(store.list_links_from_source("src").unwrap().len(), 1);
    }

    #[test]
    fn test_store_failure_propagates() {
        let err = apply_internal_links(&DownStore, "src", &[], &ApplyOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::StoreUnavailable(_)));
    }
}
