//! # Path Resolution Module
//!
//! Centralizza il calcolo dei path per ogni candidato: path relativo alla
//! radice (per i log) e path di output `.webp` accanto all'originale.

use crate::file_manager::FileManager;
use std::path::{Path, PathBuf};

/// A file selected for conversion, alive for a single iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// Absolute (as walked) path of the source image
    pub source: PathBuf,
    /// Source path relative to the scan root
    pub relative: PathBuf,
    /// Output path: same directory, `.webp` extension
    pub target: PathBuf,
}

impl CandidateFile {
    pub fn new(root: &Path, source: &Path) -> Self {
        Self {
            source: source.to_path_buf(),
            relative: PathResolver::relative_to(root, source),
            target: PathResolver::webp_target(source),
        }
    }

    /// Target path relative to the scan root
    pub fn relative_target(&self) -> PathBuf {
        PathResolver::webp_target(&self.relative)
    }

    /// The source is itself a WebP file and is re-encoded in place
    pub fn is_in_place(&self) -> bool {
        self.source == self.target
    }
}

/// Utility per calcolare i path di output in modo centralizzato
pub struct PathResolver;

impl PathResolver {
    /// WebP sources keep their own path, everything else swaps the extension
    pub fn webp_target(path: &Path) -> PathBuf {
        if FileManager::is_webp(path) {
            path.to_path_buf()
        } else {
            path.with_extension("webp")
        }
    }

    /// Path relative to `root`, or the path itself when it lies outside
    pub fn relative_to(root: &Path, path: &Path) -> PathBuf {
        path.strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
