//! One-shot report commands (`linkweave analyze|stats|orphans <org>`).

use std::path::Path;

use linkweave_core::{Error, Result};
use linkweave_linking::{analyze_internal_links, detect_orphan_content, get_internal_linking_stats};
use linkweave_store::{ArticleStore, LinkStore, SqliteStore};

/// A report subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Analyze,
    Stats,
    Orphans,
}

impl Report {
    pub fn parse(command: &str) -> Option<Self> {
        match command {
            "analyze" => Some(Self::Analyze),
            "stats" => Some(Self::Stats),
            "orphans" => Some(Self::Orphans),
            _ => None,
        }
    }
}

/// Render a report for one organization as pretty-printed JSON.
pub fn render_report<S>(store: &S, report: Report, org_id: &str) -> Result<String>
where
    S: ArticleStore + LinkStore,
{
    let value = match report {
        Report::Analyze => serde_json::to_value(analyze_internal_links(store, org_id)?)?,
        Report::Stats => serde_json::to_value(get_internal_linking_stats(store, org_id)?)?,
        Report::Orphans => {
            let articles = detect_orphan_content(store, org_id)?;
            serde_json::json!({
                "count": articles.len(),
                "articles": articles,
            })
        }
    };
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Open the store under `data_dir` and render a report.
pub fn run_report(data_dir: &Path, report: Report, org_id: &str) -> Result<String> {
    let db_dir = data_dir.join("db");
    if !db_dir.exists() {
        return Err(Error::Config(format!(
            "no database directory at {}",
            db_dir.display()
        )));
    }
    let store = SqliteStore::open(&db_dir)?;
    render_report(&store, report, org_id)
}

pub fn print_usage() {
    println!("Linkweave: internal-linking analyzer for content organizations");
    println!();
    println!("Usage: linkweave [command]");
    println!();
    println!("Commands:");
    println!("  (none)                   Start the server");
    println!("  analyze <org-id>         Print the link analysis for an organization");
    println!("  stats <org-id>           Print internal-linking KPIs");
    println!("  orphans <org-id>         List published articles with no inbound links");
    println!("  help                     Show this help message");
}
