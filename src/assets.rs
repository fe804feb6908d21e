//! Static asset chunks.
//!
//! Scripts are grouped into named chunks (vendor libraries apart from the
//! application bundle) so the long-lived vendor files cache independently.
//! Chunks are emitted into the document head in declared order.

use std::path::Path;

use tracing::{debug, warn};

use crate::config::{AssetsConfig, ChunkConfig};

/// URL prefix the static directory is mounted under.
pub const STATIC_PREFIX: &str = "/static";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChunk {
    pub name: String,
    pub urls: Vec<String>,
    /// Total size of the files that exist on disk.
    pub size_bytes: u64,
    /// Configured files that could not be found.
    pub missing: Vec<String>,
}

impl ResolvedChunk {
    #[must_use]
    pub fn size_kb(&self) -> u64 {
        self.size_bytes.div_ceil(1024)
    }
}

#[derive(Debug, Clone)]
pub struct AssetManifest {
    chunks: Vec<ResolvedChunk>,
    stylesheet: String,
    warning_limit_kb: u64,
}

impl AssetManifest {
    /// Resolve every configured chunk against the static directory, logging
    /// missing files and chunks above the size warning limit.
    #[must_use]
    pub fn load(config: &AssetsConfig) -> Self {
        let root = Path::new(&config.static_dir);
        let chunks: Vec<ResolvedChunk> = config
            .chunks
            .iter()
            .map(|chunk| resolve_chunk(root, chunk))
            .collect();

        let manifest = Self {
            chunks,
            stylesheet: asset_url(&config.stylesheet),
            warning_limit_kb: config.chunk_size_warning_kb,
        };

        for chunk in &manifest.chunks {
            for file in &chunk.missing {
                warn!(
                    name: "assets.file.missing",
                    chunk = %chunk.name,
                    file = %file,
                    "Configured asset not found under static dir"
                );
            }
            debug!(
                name: "assets.chunk.resolved",
                chunk = %chunk.name,
                size_kb = chunk.size_kb(),
                files = chunk.urls.len(),
                "Asset chunk resolved"
            );
        }
        for chunk in manifest.oversized() {
            warn!(
                name: "assets.chunk.oversized",
                chunk = %chunk.name,
                size_kb = chunk.size_kb(),
                limit_kb = manifest.warning_limit_kb,
                "Asset chunk exceeds size warning limit"
            );
        }
        manifest
    }

    /// Script URLs in load order.
    #[must_use]
    pub fn script_urls(&self) -> Vec<String> {
        self.chunks
            .iter()
            .flat_map(|c| c.urls.iter().cloned())
            .collect()
    }

    #[must_use]
    pub fn stylesheet_url(&self) -> &str {
        &self.stylesheet
    }

    #[must_use]
    pub fn oversized(&self) -> Vec<&ResolvedChunk> {
        self.chunks
            .iter()
            .filter(|c| c.size_kb() > self.warning_limit_kb)
            .collect()
    }
}

fn resolve_chunk(root: &Path, chunk: &ChunkConfig) -> ResolvedChunk {
    let mut size_bytes = 0;
    let mut missing = Vec::new();
    for file in &chunk.files {
        match std::fs::metadata(root.join(file)) {
            Ok(meta) if meta.is_file() => size_bytes += meta.len(),
            _ => missing.push(file.clone()),
        }
    }
    ResolvedChunk {
        name: chunk.name.clone(),
        urls: chunk.files.iter().map(|f| asset_url(f)).collect(),
        size_bytes,
        missing,
    }
}

fn asset_url(file: &str) -> String {
    format!("{STATIC_PREFIX}/{}", file.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn config(dir: &Path, limit_kb: u64, chunks: Vec<ChunkConfig>) -> AssetsConfig {
        AssetsConfig {
            static_dir: dir.to_string_lossy().into_owned(),
            stylesheet: "app.css".to_string(),
            chunk_size_warning_kb: limit_kb,
            chunks,
        }
    }

    fn chunk(name: &str, files: &[&str]) -> ChunkConfig {
        ChunkConfig {
            name: name.to_string(),
            files: files.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn urls_follow_declared_order() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = AssetManifest::load(&config(
            dir.path(),
            1000,
            vec![
                chunk("vendor", &["vendor/a.js", "vendor/b.js"]),
                chunk("app", &["/main.js"]),
            ],
        ));
        assert_eq!(
            manifest.script_urls(),
            vec!["/static/vendor/a.js", "/static/vendor/b.js", "/static/main.js"]
        );
        assert_eq!(manifest.stylesheet_url(), "/static/app.css");
    }

    #[test]
    fn sizes_and_missing_files_are_recorded() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("vendor")).unwrap();
        fs::write(dir.path().join("vendor/big.js"), vec![b'x'; 3 * 1024]).unwrap();

        let manifest = AssetManifest::load(&config(
            dir.path(),
            2,
            vec![
                chunk("vendor", &["vendor/big.js", "vendor/gone.js"]),
                chunk("app", &["main.js"]),
            ],
        ));

        let vendor = &manifest.chunks[0];
        assert_eq!(vendor.size_kb(), 3);
        assert_eq!(vendor.missing, vec!["vendor/gone.js".to_string()]);

        let oversized: Vec<_> = manifest.oversized().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(oversized, vec!["vendor"]);
    }
}
