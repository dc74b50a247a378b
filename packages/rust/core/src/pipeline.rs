//! End-to-end generation: site tree → documents, route tree → entries,
//! both → `llms-full.txt` and `llms.txt`.
//!
//! The two phases mirror the host build: [`Generator::load_content`] runs
//! before the site is built, [`Generator::post_build`] once the route tree and
//! output directory exist.

use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use llmsgen_shared::{
    DocumentRecord, GenerationConfig, RenderedArtifacts, Result, RouteNode, SiteMetadata,
};

use crate::aggregator;
use crate::assembler::{self, ArtifactMeta};
use crate::collector;
use crate::index;
use crate::matcher::ExclusionMatcher;
use crate::routes::{self, RouteScan};

/// Documents gathered in the load phase.
#[derive(Debug, Clone, Default)]
pub struct LoadedContent {
    /// Collected documents, in traversal order.
    pub documents: Vec<DocumentRecord>,
}

/// Inputs the host hands over after building the site.
#[derive(Debug, Clone, Copy)]
pub struct PostBuildContext<'a> {
    /// Route tree of the built site.
    pub routes: &'a [RouteNode],
    /// Site title, tagline and URLs.
    pub site: &'a SiteMetadata,
    /// Directory the artifacts are written into.
    pub out_dir: &'a Path,
}

/// Summary of one generation run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Documents concatenated into the full export.
    pub document_count: usize,
    /// Entries listed in the index export.
    pub entry_count: usize,
    /// Route documents dropped for lacking a title.
    pub untitled_skipped: usize,
    /// Written artifacts: full export first, then the index.
    pub artifacts: Vec<ArtifactMeta>,
    /// Wall time of the run.
    pub elapsed: std::time::Duration,
}

/// Runs generation with one fixed configuration.
#[derive(Debug, Clone)]
pub struct Generator {
    config: GenerationConfig,
    matcher: ExclusionMatcher,
}

impl Generator {
    /// Validate the config and compile its exclusion patterns.
    pub fn new(config: GenerationConfig) -> Result<Self> {
        config.validate()?;
        let matcher = ExclusionMatcher::new(&config.exclude_patterns);
        Ok(Self { config, matcher })
    }

    /// Load phase: collect every non-excluded document under `site_dir`.
    #[instrument(skip_all, fields(site_dir = %site_dir.display()))]
    pub async fn load_content(&self, site_dir: &Path) -> Result<LoadedContent> {
        info!("loading content");
        let documents = collector::collect_documents(site_dir, &self.matcher).await?;
        Ok(LoadedContent { documents })
    }

    /// Render both exports without touching the file system.
    ///
    /// Never fails: any site metadata and route tree render to some index.
    pub fn render(
        &self,
        content: &LoadedContent,
        routes: &[RouteNode],
        site: &SiteMetadata,
        now: DateTime<Utc>,
    ) -> (RenderedArtifacts, RouteScan) {
        let full = aggregator::render_full_export(&content.documents);
        let scan = routes::scan_routes(routes);
        info!(
            docs_plugin_routes = scan.docs_plugin_routes,
            entries = scan.entries.len(),
            "found documentation entries"
        );
        let index = index::build_index(site, &scan.entries, now);

        (RenderedArtifacts { index, full }, scan)
    }

    /// Post-build phase: render and write the full export, then the index.
    ///
    /// Both files are overwritten. If the index write fails the new full
    /// export stays on disk.
    #[instrument(skip_all, fields(out_dir = %ctx.out_dir.display()))]
    pub async fn post_build(
        &self,
        content: &LoadedContent,
        ctx: PostBuildContext<'_>,
        now: DateTime<Utc>,
    ) -> Result<GenerationReport> {
        let start = Instant::now();
        let (rendered, scan) = self.render(content, ctx.routes, ctx.site, now);

        let artifacts = assembler::write_artifacts(
            ctx.out_dir,
            &[
                (self.config.output_file_name_full.as_str(), rendered.full.as_str()),
                (self.config.output_file_name.as_str(), rendered.index.as_str()),
            ],
        )
        .await?;

        info!(
            file = %self.config.output_file_name_full,
            bytes = rendered.full_len(),
            "wrote full export"
        );
        info!(
            file = %self.config.output_file_name,
            bytes = rendered.index_len(),
            "wrote index export"
        );

        Ok(GenerationReport {
            document_count: content.documents.len(),
            entry_count: scan.entries.len(),
            untitled_skipped: scan.untitled,
            artifacts,
            elapsed: start.elapsed(),
        })
    }

    /// Run both phases, stamping the index with the current time.
    #[instrument(skip_all, fields(site_dir = %site_dir.display()))]
    pub async fn generate(
        &self,
        site_dir: &Path,
        ctx: PostBuildContext<'_>,
    ) -> Result<GenerationReport> {
        let start = Instant::now();
        let content = self.load_content(site_dir).await?;
        let mut report = self.post_build(&content, ctx, Utc::now()).await?;
        report.elapsed = start.elapsed();

        info!(
            documents = report.document_count,
            entries = report.entry_count,
            elapsed_ms = report.elapsed.as_millis(),
            "generation complete"
        );
        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use llmsgen_shared::LlmsGenError;
    use serde_json::json;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn site() -> SiteMetadata {
        SiteMetadata {
            title: "Docs".into(),
            tagline: Some("Read me".into()),
            url: "https://docs.example.com".into(),
            base_url: "/".into(),
        }
    }

    fn route_tree() -> Vec<RouteNode> {
        serde_json::from_value(json!([{
            "path": "/docs",
            "plugin": { "name": "docusaurus-plugin-content-docs" },
            "routes": [{
                "path": "/",
                "props": { "version": { "docs": {
                    "/intro": { "title": "Intro", "description": "Start" },
                    "/guide": { "title": "Guide" },
                    "/draft": { "id": "draft" }
                } } }
            }]
        }]))
        .unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = GenerationConfig {
            output_file_name: String::new(),
            ..GenerationConfig::default()
        };
        assert!(Generator::new(config).is_err());
    }

    #[tokio::test]
    async fn end_to_end_writes_both_exports() {
        let site_dir = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        write(site_dir.path(), "a.md", "Hello");
        write(site_dir.path(), "docs/CLAUDE.md", "secret");

        let generator = Generator::new(GenerationConfig::default()).unwrap();
        let content = generator.load_content(site_dir.path()).await.unwrap();
        let routes = route_tree();
        let site = site();
        let ctx = PostBuildContext {
            routes: &routes,
            site: &site,
            out_dir: out_dir.path(),
        };

        let report = generator.post_build(&content, ctx, now()).await.unwrap();
        assert_eq!(report.document_count, 1);
        assert_eq!(report.entry_count, 2);
        assert_eq!(report.untitled_skipped, 1);
        assert_eq!(report.artifacts[0].filename, "llms-full.txt");
        assert_eq!(report.artifacts[1].filename, "llms.txt");

        let full = std::fs::read_to_string(out_dir.path().join("llms-full.txt")).unwrap();
        assert_eq!(full, "<!-- Source: a.md -->\n\nHello");

        let index = std::fs::read_to_string(out_dir.path().join("llms.txt")).unwrap();
        assert_eq!(
            index,
            "# Docs\n\nRead me\n\n## Documentation\n\n\
             - [Guide](/guide)\n\
             - [Intro](/intro): Start\n\
             \n\n## Metadata\n\n\
             - Generated: 2024-01-01T00:00:00.000Z\n\
             - Base URL: https://docs.example.com/\n\
             - Total Documents: 2\n"
        );
    }

    #[tokio::test]
    async fn reruns_are_byte_identical_for_fixed_time() {
        let site_dir = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        write(site_dir.path(), "docs/one.md", "One");
        write(site_dir.path(), "docs/two.mdx", "Two");

        let generator = Generator::new(GenerationConfig::default()).unwrap();
        let routes = route_tree();
        let site = site();
        let ctx = PostBuildContext {
            routes: &routes,
            site: &site,
            out_dir: out_dir.path(),
        };

        let mut outputs = Vec::new();
        for _ in 0..2 {
            let content = generator.load_content(site_dir.path()).await.unwrap();
            generator.post_build(&content, ctx, now()).await.unwrap();
            outputs.push((
                std::fs::read(out_dir.path().join("llms.txt")).unwrap(),
                std::fs::read(out_dir.path().join("llms-full.txt")).unwrap(),
            ));
        }
        assert_eq!(outputs[0], outputs[1]);
    }

    #[tokio::test]
    async fn custom_file_names_are_used() {
        let site_dir = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        write(site_dir.path(), "a.md", "A");

        let config = GenerationConfig {
            output_file_name: "index.txt".into(),
            output_file_name_full: "everything.txt".into(),
            ..GenerationConfig::default()
        };
        let generator = Generator::new(config).unwrap();
        let site = site();
        let ctx = PostBuildContext {
            routes: &[],
            site: &site,
            out_dir: out_dir.path(),
        };

        generator.generate(site_dir.path(), ctx).await.unwrap();
        assert!(out_dir.path().join("index.txt").exists());
        assert!(out_dir.path().join("everything.txt").exists());
        assert!(!out_dir.path().join("llms.txt").exists());
    }

    #[test]
    fn render_without_routes_lists_no_documentation() {
        let generator = Generator::new(GenerationConfig::default()).unwrap();
        let site = SiteMetadata {
            title: "Docs".into(),
            ..SiteMetadata::default()
        };

        let (rendered, scan) = generator.render(&LoadedContent::default(), &[], &site, now());
        assert!(scan.entries.is_empty());
        assert!(!rendered.index.contains("## Documentation"));
        assert!(rendered.index.contains("- Total Documents: 0\n"));
        assert_eq!(rendered.full, "");
    }

    #[tokio::test]
    async fn empty_title_still_writes_both_exports() {
        let out_dir = tempfile::tempdir().unwrap();
        let generator = Generator::new(GenerationConfig::default()).unwrap();
        let site = SiteMetadata::default();
        let ctx = PostBuildContext {
            routes: &[],
            site: &site,
            out_dir: out_dir.path(),
        };

        generator
            .post_build(&LoadedContent::default(), ctx, now())
            .await
            .unwrap();

        let index = std::fs::read_to_string(out_dir.path().join("llms.txt")).unwrap();
        assert!(index.starts_with("# \n\n## Metadata\n\n"), "{index:?}");
        assert!(out_dir.path().join("llms-full.txt").exists());
    }

    #[tokio::test]
    async fn unreadable_site_aborts_generation() {
        let tmp = tempfile::tempdir().unwrap();
        let generator = Generator::new(GenerationConfig::default()).unwrap();
        let site = site();
        let ctx = PostBuildContext {
            routes: &[],
            site: &site,
            out_dir: tmp.path(),
        };

        let err = generator
            .generate(&tmp.path().join("missing"), ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, LlmsGenError::Io { .. }));
        assert!(!tmp.path().join("llms.txt").exists());
    }
}
