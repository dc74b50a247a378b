//! Index export builder.
//!
//! Renders the `llms.txt`-style index: site heading, optional tagline, a
//! path-sorted list of documentation links, and a metadata footer. The
//! render time is an input, so identical inputs give identical output.

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, instrument};

use llmsgen_shared::{DocEntry, SiteMetadata};

/// Build the index document.
///
/// Layout:
/// ```text
/// # {title}
///
/// {tagline}
///
/// ## Documentation
///
/// - [{title}]({path}): {description}
///
///
/// ## Metadata
///
/// - Generated: {now}
/// - Base URL: {url}{base_url}
/// - Total Documents: {count}
/// ```
/// The tagline and Documentation section only appear when non-empty.
#[instrument(skip_all, fields(entries = entries.len()))]
pub fn build_index(site: &SiteMetadata, entries: &[DocEntry], now: DateTime<Utc>) -> String {
    let mut out = format!("# {}", site.title);

    if let Some(tagline) = site.tagline() {
        out.push_str(&format!("\n\n{tagline}"));
    }

    if !entries.is_empty() {
        out.push_str("\n\n## Documentation\n\n");

        let mut sorted = entries.to_vec();
        sort_entries(&mut sorted);

        for entry in &sorted {
            out.push_str(&render_entry(entry));
            out.push('\n');
        }
    }

    out.push_str(&format!(
        "\n\n## Metadata\n\n- Generated: {}\n- Base URL: {}\n- Total Documents: {}\n",
        format_timestamp(now),
        site.full_base_url(),
        entries.len()
    ));

    debug!(bytes = out.len(), "index rendered");
    out
}

/// Stable lexicographic sort by path; entries sharing a path keep their order.
pub fn sort_entries(entries: &mut [DocEntry]) {
    entries.sort_by(|a, b| a.path.cmp(&b.path));
}

/// `- [title](path)` with `: description` when the description is non-empty.
fn render_entry(entry: &DocEntry) -> String {
    if entry.description.is_empty() {
        format!("- [{}]({})", entry.title, entry.path)
    } else {
        format!("- [{}]({}): {}", entry.title, entry.path, entry.description)
    }
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
