//! Path exclusion matching.
//!
//! Patterns use a simplified wildcard scheme, not glob semantics:
//! - A pattern containing `**` is split at every `**`; `*` is stripped from
//!   each fragment, and a path matches when it contains every fragment as a
//!   substring, in any order.
//! - Any other pattern has `*` stripped and is a plain substring test.
//!
//! So `**/CLAUDE.md` matches `docs/CLAUDE.md` but not a top-level
//! `CLAUDE.md`, and `**/node_modules/**` only matches paths with a
//! `/node_modules/` segment somewhere after the first component.

use tracing::warn;

/// Decides whether a site-relative path is excluded.
pub trait PathMatcher: Send + Sync {
    /// `true` if `path` must be skipped.
    fn matches(&self, path: &str) -> bool;
}

/// One compiled exclusion pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionPattern {
    /// From a `**` pattern: every fragment must occur in the path.
    Fragments(Vec<String>),
    /// Plain pattern: the literal must occur in the path.
    Substring(String),
}

impl ExclusionPattern {
    /// Compile a raw configured pattern.
    pub fn compile(raw: &str) -> Self {
        if raw.contains("**") {
            Self::Fragments(raw.split("**").map(strip_wildcards).collect())
        } else {
            Self::Substring(strip_wildcards(raw))
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Fragments(parts) => parts.iter().all(|part| path.contains(part.as_str())),
            Self::Substring(literal) => path.contains(literal.as_str()),
        }
    }

    /// `true` if the pattern has no literal text left and so matches any path.
    pub fn matches_everything(&self) -> bool {
        match self {
            Self::Fragments(parts) => parts.iter().all(String::is_empty),
            Self::Substring(literal) => literal.is_empty(),
        }
    }
}

fn strip_wildcards(fragment: &str) -> String {
    fragment.replace('*', "")
}

/// Ordered set of compiled exclusion patterns. A path is excluded when any
/// pattern matches it.
#[derive(Debug, Clone, Default)]
pub struct ExclusionMatcher {
    patterns: Vec<ExclusionPattern>,
}

impl ExclusionMatcher {
    /// Compile every configured pattern once, up front.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|raw| {
                let raw = raw.as_ref();
                let compiled = ExclusionPattern::compile(raw);
                if compiled.matches_everything() {
                    warn!(pattern = raw, "exclusion pattern matches every path");
                }
                compiled
            })
            .collect();

        Self { patterns }
    }
}

impl PathMatcher for ExclusionMatcher {
    fn matches(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(path))
    }
}
