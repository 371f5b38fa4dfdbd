//! # File Management Module
//!
//! Questo modulo gestisce la selezione dei file e la discovery delle immagini.
//!
//! ## Responsabilità:
//! - Determina se un file è candidato alla conversione (estensione)
//! - Discovery ricorsiva e lazy dei candidati in una directory
//! - Applica il `DirectoryFilter` durante l'attraversamento
//!
//! ## Formati supportati:
//! - **Immagini**: PNG, JPG, JPEG, WebP (case-insensitive)
//!
//! ## Attraversamento:
//! - Ordinato per nome file, top-down
//! - Le directory ignorate vengono potate insieme a tutti i discendenti
//! - Le directory non ammesse vengono attraversate ma i loro file esclusi
//! - I file non supportati vengono loggati a livello debug e scartati
//!
//! ## Esempio:
//! ```rust,no_run
//! use std::path::Path;
//! use webp_converter::{filter::DirectoryFilter, FileManager};
//!
//! let filter = DirectoryFilter::new(&["cache"], &[]);
//! for candidate in FileManager::find_candidates(Path::new("/path/to/images"), filter) {
//!     println!("{}", candidate.relative.display());
//! }
//! ```

use crate::converter::path_resolver::CandidateFile;
use crate::filter::DirectoryFilter;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Manages file selection and discovery
pub struct FileManager;

impl FileManager {
    /// Check if a file is a conversion candidate
    pub fn is_candidate(path: &Path) -> bool {
        if let Some(ext) = path.extension() {
            let ext_lower = ext.to_string_lossy().to_lowercase();
            matches!(ext_lower.as_str(), "png" | "jpg" | "jpeg" | "webp")
        } else {
            false
        }
    }

    /// Check if a file already has the WebP extension
    pub fn is_webp(path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("webp"))
            .unwrap_or(false)
    }

    /// Lazily walk `root` and yield every candidate accepted by `filter`
    pub fn find_candidates(root: &Path, filter: DirectoryFilter) -> CandidateWalker {
        CandidateWalker::new(root, filter)
    }
}

type EntryPredicate = Box<dyn FnMut(&DirEntry) -> bool + Send>;

/// Lazy, top-down sequence of candidate files under a root
pub struct CandidateWalker {
    root: PathBuf,
    filter: DirectoryFilter,
    entries: walkdir::FilterEntry<walkdir::IntoIter, EntryPredicate>,
}

impl CandidateWalker {
    fn new(root: &Path, filter: DirectoryFilter) -> Self {
        let prune = filter.clone();
        let predicate: EntryPredicate = Box::new(move |entry: &DirEntry| {
            if entry.file_type().is_dir() && prune.should_skip(entry.path()) {
                debug!("Skipping folder: {}", entry.path().display());
                return false;
            }
            true
        });

        let entries = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(predicate);

        Self {
            root: root.to_path_buf(),
            filter,
            entries,
        }
    }
}

impl Iterator for CandidateWalker {
    type Item = CandidateFile;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Cannot read directory entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();

            if entry.file_type().is_dir() {
                if !self.filter.should_process(path) {
                    debug!("Not in allowed folders: {}", path.display());
                }
                continue;
            }

            // Links to files are read through the link, links to directories are not followed
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && path.is_file());
            if !is_file {
                debug!(
                    "Skipping non-file entry: {}",
                    path.strip_prefix(&self.root).unwrap_or(path).display()
                );
                continue;
            }

            let dir = path.parent().unwrap_or(&self.root);
            if !self.filter.accepts(dir) {
                continue;
            }

            if !FileManager::is_candidate(path) {
                debug!(
                    "Skipping non-targeted file: {}",
                    path.strip_prefix(&self.root).unwrap_or(path).display()
                );
                continue;
            }

            return Some(CandidateFile::new(&self.root, path));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    fn relative_names(root: &Path, filter: DirectoryFilter) -> Vec<String> {
        FileManager::find_candidates(root, filter)
            .map(|c| c.relative.to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_is_candidate() {
        assert!(FileManager::is_candidate(Path::new("a.png")));
        assert!(FileManager::is_candidate(Path::new("a.PNG")));
        assert!(FileManager::is_candidate(Path::new("dir/b.Jpg")));
        assert!(FileManager::is_candidate(Path::new("c.jpeg")));
        assert!(FileManager::is_candidate(Path::new("d.webp")));
        assert!(!FileManager::is_candidate(Path::new("a.txt")));
        assert!(!FileManager::is_candidate(Path::new("a.gif")));
        assert!(!FileManager::is_candidate(Path::new("README")));
        assert!(!FileManager::is_candidate(Path::new("png")));
    }

    #[test]
    fn test_is_webp() {
        assert!(FileManager::is_webp(Path::new("a.webp")));
        assert!(FileManager::is_webp(Path::new("a.WebP")));
        assert!(!FileManager::is_webp(Path::new("a.png")));
        assert!(!FileManager::is_webp(Path::new("webp")));
    }

    #[test]
    fn test_find_candidates_prunes_ignored_subtree() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "a.jpg");
        touch(root, "notes.txt");
        touch(root, "sub/b.png");
        touch(root, "sub/ignored/c.jpg");
        touch(root, "sub/ignored/deeper/d.jpg");

        let filter = DirectoryFilter::new(&["ignored"], &[]);
        assert_eq!(relative_names(root, filter), vec!["a.jpg", "sub/b.png"]);
    }

    #[test]
    fn test_find_candidates_allow_list() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "top.jpg");
        touch(root, "photos/p1.jpg");
        touch(root, "photos/nested/p2.webp");
        touch(root, "other/o1.png");

        let filter = DirectoryFilter::new(&[] as &[&str], &["Photos"]);
        assert_eq!(
            relative_names(root, filter),
            vec!["photos/nested/p2.webp", "photos/p1.jpg"]
        );
    }

    #[test]
    fn test_find_candidates_ignore_beats_allow() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "keep/a.png");
        touch(root, "keep/skip/b.png");

        let filter = DirectoryFilter::new(&["skip"], &["keep"]);
        assert_eq!(relative_names(root, filter), vec!["keep/a.png"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_find_candidates_follows_file_symlinks() {
        let temp_dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(outside.path(), "real.png");
        touch(outside.path(), "gallery/inner.png");

        std::os::unix::fs::symlink(outside.path().join("real.png"), root.join("link.png")).unwrap();
        std::os::unix::fs::symlink(outside.path().join("gallery"), root.join("gallery")).unwrap();
        std::os::unix::fs::symlink(root.join("missing.png"), root.join("dangling.png")).unwrap();

        let candidates: Vec<_> = FileManager::find_candidates(root, DirectoryFilter::default()).collect();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].source, root.join("link.png"));
        assert_eq!(candidates[0].target, root.join("link.webp"));
    }

    #[test]
    fn test_candidate_targets() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "x/photo.JPG");

        let candidates: Vec<_> = FileManager::find_candidates(root, DirectoryFilter::default()).collect();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].source, root.join("x/photo.JPG"));
        assert_eq!(candidates[0].target, root.join("x/photo.webp"));
    }
}
