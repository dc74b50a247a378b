//! Artifact writer.
//!
//! Writes rendered exports into the output directory. Each file is written
//! to a hidden temp file and renamed over the target, so readers never see a
//! half-written artifact. Files are written one after another; a failure
//! leaves earlier artifacts in place.

use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument};

use llmsgen_shared::{LlmsGenError, Result};

/// Metadata for a single written artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactMeta {
    pub filename: String,
    pub sha256: String,
    pub size_bytes: usize,
}

/// Write `(filename, content)` pairs into `out_dir`, in order, overwriting
/// whatever was there.
#[instrument(skip_all, fields(out_dir = %out_dir.display(), artifact_count = artifacts.len()))]
pub async fn write_artifacts(out_dir: &Path, artifacts: &[(&str, &str)]) -> Result<Vec<ArtifactMeta>> {
    tokio::fs::create_dir_all(out_dir)
        .await
        .map_err(|e| LlmsGenError::io(out_dir, e))?;

    let mut metas = Vec::with_capacity(artifacts.len());
    for (filename, content) in artifacts {
        metas.push(write_artifact(out_dir, filename, content).await?);
    }

    info!(count = metas.len(), "artifacts written");
    Ok(metas)
}

async fn write_artifact(out_dir: &Path, filename: &str, content: &str) -> Result<ArtifactMeta> {
    let target = out_dir.join(filename);
    let temp = out_dir.join(format!(".{filename}.tmp"));

    tokio::fs::write(&temp, content)
        .await
        .map_err(|e| LlmsGenError::io(&temp, e))?;
    tokio::fs::rename(&temp, &target)
        .await
        .map_err(|e| LlmsGenError::io(&target, e))?;

    let meta = ArtifactMeta {
        filename: filename.to_string(),
        sha256: sha256_hex(content),
        size_bytes: content.len(),
    };
    debug!(file = %filename, size = meta.size_bytes, "wrote artifact");

    Ok(meta)
}

fn sha256_hex(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_files_and_reports_checksums() {
        let tmp = tempfile::tempdir().unwrap();
        let artifacts = [("llms.txt", "# Docs\n"), ("llms-full.txt", "body")];

        let metas = write_artifacts(tmp.path(), &artifacts).await.unwrap();

        assert_eq!(metas.len(), 2);
        assert_eq!(metas[0].filename, "llms.txt");
        assert_eq!(metas[0].sha256.len(), 64);
        assert_eq!(metas[1].size_bytes, 4);
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("llms.txt")).unwrap(),
            "# Docs\n"
        );
    }

    #[tokio::test]
    async fn overwrites_previous_output() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("llms.txt"), "old content that is longer").unwrap();

        write_artifacts(tmp.path(), &[("llms.txt", "new")]).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(tmp.path().join("llms.txt")).unwrap(),
            "new"
        );
    }

    #[tokio::test]
    async fn creates_missing_output_dir_and_leaves_no_temp_files() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("build").join("static");

        write_artifacts(&out, &[("llms.txt", "x")]).await.unwrap();

        for entry in std::fs::read_dir(&out).unwrap() {
            let name = entry.unwrap().file_name().to_string_lossy().to_string();
            assert!(!name.starts_with('.'), "temp file left behind: {name}");
        }
    }

    #[tokio::test]
    async fn failure_keeps_earlier_artifacts() {
        let tmp = tempfile::tempdir().unwrap();
        // A directory in the way makes the rename onto it fail.
        std::fs::create_dir_all(tmp.path().join("llms.txt").join("blocker")).unwrap();

        let err = write_artifacts(tmp.path(), &[("llms-full.txt", "full"), ("llms.txt", "index")])
            .await
            .unwrap_err();

        assert!(matches!(err, LlmsGenError::Io { .. }));
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("llms-full.txt")).unwrap(),
            "full"
        );
    }

    #[test]
    fn sha256_is_stable() {
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
