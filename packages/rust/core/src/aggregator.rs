//! Full-text export: every collected document, in collection order, behind a
//! provenance comment.

use llmsgen_shared::DocumentRecord;

/// Separator placed between document blocks.
pub const BLOCK_SEPARATOR: &str = "\n\n---\n\n";

/// Provenance line preceding each document body.
pub fn source_marker(path: &str) -> String {
    format!("<!-- Source: {path} -->")
}

/// Concatenate documents as `<!-- Source: {path} -->\n\n{content}` blocks
/// joined by `\n\n---\n\n`. Content is emitted byte-for-byte.
pub fn render_full_export(records: &[DocumentRecord]) -> String {
    records
        .iter()
        .map(|record| format!("{}\n\n{}", source_marker(&record.path), record.content))
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, content: &str) -> DocumentRecord {
        DocumentRecord {
            path: path.into(),
            content: content.into(),
        }
    }

    #[test]
    fn empty_collection_renders_nothing() {
        assert_eq!(render_full_export(&[]), "");
    }

    #[test]
    fn single_document_has_no_separator() {
        assert_eq!(
            render_full_export(&[record("a.md", "Hello")]),
            "<!-- Source: a.md -->\n\nHello"
        );
    }

    #[test]
    fn keeps_collection_order() {
        let out = render_full_export(&[record("z.md", "last?"), record("a.md", "first?")]);
        assert_eq!(
            out,
            "<!-- Source: z.md -->\n\nlast?\n\n---\n\n<!-- Source: a.md -->\n\nfirst?"
        );
    }

    #[test]
    fn every_record_appears_verbatim() {
        let records = vec![
            record("docs/intro.md", "# Intro\n\nSome *markdown* [link](./x.md)\n"),
            record("docs/tricky.mdx", "---\n\n<!-- Source: fake -->\n"),
            record("empty.md", ""),
        ];
        let out = render_full_export(&records);

        for r in &records {
            let block = format!("{}\n\n{}", source_marker(&r.path), r.content);
            assert!(out.contains(&block), "missing block for {}", r.path);
        }
        assert_eq!(out.matches("<!-- Source: ").count(), records.len() + 1);
    }
}
