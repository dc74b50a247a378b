//! Document collection from the site tree.
//!
//! Walks the site root depth-first in directory-listing order, skips
//! excluded paths, and reads every `.md` / `.mdx` file. The walk awaits each
//! listing and read in turn; nothing runs concurrently.

use std::path::Path;

use tracing::{debug, info, instrument};

use llmsgen_shared::{DocumentRecord, LlmsGenError, Result};

use crate::matcher::PathMatcher;

/// File suffixes treated as documents.
pub const DOCUMENT_SUFFIXES: [&str; 2] = [".md", ".mdx"];

/// Collect every non-excluded document under `root`.
///
/// The returned order is traversal order, which depends on the platform's
/// directory listing and is not sorted. Any listing or read failure aborts
/// the walk.
#[instrument(skip_all, fields(root = %root.display()))]
pub async fn collect_documents<M>(root: &Path, matcher: &M) -> Result<Vec<DocumentRecord>>
where
    M: PathMatcher + ?Sized,
{
    let mut records = Vec::new();
    walk(root, root, matcher, &mut records).await?;

    info!(documents = records.len(), "collected documents");
    Ok(records)
}

/// `true` if the file name carries a document suffix.
pub fn is_document(file_name: &str) -> bool {
    DOCUMENT_SUFFIXES
        .iter()
        .any(|suffix| file_name.ends_with(suffix))
}

async fn walk<M>(
    root: &Path,
    dir: &Path,
    matcher: &M,
    records: &mut Vec<DocumentRecord>,
) -> Result<()>
where
    M: PathMatcher + ?Sized,
{
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| LlmsGenError::io(dir, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| LlmsGenError::io(dir, e))?
    {
        let full_path = entry.path();
        let relative = full_path
            .strip_prefix(root)
            .unwrap_or(&full_path)
            .to_string_lossy()
            .into_owned();

        // Exclusion applies to directories too; an excluded directory is not entered.
        if matcher.matches(&relative) {
            debug!(path = %relative, "skipping excluded path");
            continue;
        }

        let file_type = entry
            .file_type()
            .await
            .map_err(|e| LlmsGenError::io(&full_path, e))?;

        if file_type.is_dir() {
            Box::pin(walk(root, &full_path, matcher, records)).await?;
        } else if is_document(&entry.file_name().to_string_lossy()) {
            debug!(path = %relative, "reading document");
            let content = tokio::fs::read_to_string(&full_path)
                .await
                .map_err(|e| LlmsGenError::io(&full_path, e))?;
            records.push(DocumentRecord {
                path: relative,
                content,
            });
        }
    }

    Ok(())
}
