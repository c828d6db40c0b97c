//! Markdown run report
//!
//! Renders a [`CrawlSummary`] as a human-readable report: run metadata, link
//! counts, the files written and every skipped link with its reason.

use crate::output::summary::CrawlSummary;
use crate::MirrorError;
use std::path::Path;

/// Writes the run report to `output_path`, creating parent directories
///
/// # Returns
///
/// * `Ok(())` - Report written
/// * `Err(MirrorError::FileWrite)` - The directory or file could not be written
pub fn generate_markdown_summary(summary: &CrawlSummary, output_path: &Path) -> Result<(), MirrorError> {
    let markdown = format_markdown_summary(summary);
    let to_error = |source| MirrorError::FileWrite {
        path: output_path.to_path_buf(),
        source,
    };

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(to_error)?;
        }
    }
    std::fs::write(output_path, markdown).map_err(to_error)?;

    Ok(())
}

/// Formats a crawl summary as markdown
pub fn format_markdown_summary(summary: &CrawlSummary) -> String {
    let mut md = String::new();

    md.push_str("# Markdown Mirror Crawl Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Start URL**: {}\n", summary.start_url));
    if let Some(scope) = &summary.scope {
        md.push_str(&format!("- **Scope**: {}\n", scope));
    }
    md.push_str(&format!("- **Started**: {}\n", summary.started_at.to_rfc3339()));
    if let Some(finished) = &summary.finished_at {
        md.push_str(&format!("- **Finished**: {}\n", finished.to_rfc3339()));
    }
    if let Some(duration) = summary.duration() {
        md.push_str(&format!(
            "- **Duration**: {:.2} seconds\n",
            duration.num_milliseconds() as f64 / 1000.0
        ));
    }
    md.push_str(&format!("- **Final Phase**: {}\n", summary.phase));
    if let Some(hash) = &summary.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    // Counts
    md.push_str("## Statistics\n\n");
    md.push_str(&format!("- **Links Found**: {}\n", summary.links_found));
    md.push_str(&format!("- **Links Processed**: {}\n", summary.records.len()));
    md.push_str(&format!("- **Saved**: {}\n", summary.saved_count()));
    md.push_str(&format!("- **Skipped**: {}\n", summary.skipped_count()));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n\n",
        summary.success_rate()
    ));

    let saved = summary.saved_files();
    if !saved.is_empty() {
        md.push_str("## Saved Files\n\n");
        for path in saved {
            md.push_str(&format!("- {}\n", path.display()));
        }
        md.push('\n');
    }

    let skipped: Vec<_> = summary.skipped().collect();
    if !skipped.is_empty() {
        md.push_str("## Skipped Links\n\n");
        md.push_str("| URL | Reason |\n");
        md.push_str("|-----|--------|\n");
        for record in skipped {
            md.push_str(&format!("| {} | {} |\n", record.url, record.outcome));
        }
        md.push('\n');
    }

    md
}
