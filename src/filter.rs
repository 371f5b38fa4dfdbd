//! # Directory Filter Module
//!
//! Decide se una directory va saltata o elaborata in base alle liste
//! ignore/allow.
//!
//! ## Regole:
//! - Il confronto avviene per segmento di path, case-insensitive
//! - `ignore` ha precedenza: una directory ignorata viene potata con tutti i discendenti
//! - `allow` vuoto significa "tutte le directory"
//! - Una directory non ammessa viene comunque attraversata, ma i suoi file non vengono elaborati

use std::path::Path;

/// Returns true if any segment of `path` matches any of `tokens`, ignoring case.
fn any_segment_matches<S: AsRef<str>>(path: &Path, tokens: &[S]) -> bool {
    path.iter()
        .map(|segment| segment.to_string_lossy().to_lowercase())
        .any(|segment| {
            tokens
                .iter()
                .any(|token| token.as_ref().to_lowercase() == segment)
        })
}

/// Check if a folder should be skipped based on the ignore list
pub fn should_skip_folder<S: AsRef<str>>(path: &Path, ignore_folders: &[S]) -> bool {
    any_segment_matches(path, ignore_folders)
}

/// Check if a folder should be processed based on the allow list
pub fn should_process_folder<S: AsRef<str>>(path: &Path, allow_folders: &[S]) -> bool {
    allow_folders.is_empty() || any_segment_matches(path, allow_folders)
}

/// Ignore/allow lists for one run, normalized to lowercase once
#[derive(Debug, Clone, Default)]
pub struct DirectoryFilter {
    ignore: Vec<String>,
    allow: Vec<String>,
}

impl DirectoryFilter {
    pub fn new<S: AsRef<str>>(ignore: &[S], allow: &[S]) -> Self {
        Self {
            ignore: ignore.iter().map(|t| t.as_ref().to_lowercase()).collect(),
            allow: allow.iter().map(|t| t.as_ref().to_lowercase()).collect(),
        }
    }

    pub fn should_skip(&self, path: &Path) -> bool {
        should_skip_folder(path, &self.ignore)
    }

    pub fn should_process(&self, path: &Path) -> bool {
        should_process_folder(path, &self.allow)
    }

    /// Files directly inside `dir` are eligible: not ignored, and allowed
    pub fn accepts(&self, dir: &Path) -> bool {
        !self.should_skip(dir) && self.should_process(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_skip_folder() {
        let cases: Vec<(&str, Vec<&str>, bool)> = vec![
            ("/images/photos", vec!["photos"], true),
            ("/images/docs", vec!["photos"], false),
            ("/images/photos/sub", vec!["photos"], true),
            ("/images/Photos", vec!["PHOTOS"], true),
            ("/images/photos2", vec!["photos"], false),
            ("/images/photos", vec![], false),
        ];

        for (path, ignore, expected) in cases {
            assert_eq!(
                should_skip_folder(Path::new(path), &ignore),
                expected,
                "path {} with ignore {:?}",
                path,
                ignore
            );
        }
    }

    #[test]
    fn test_should_process_folder() {
        let cases: Vec<(&str, Vec<&str>, bool)> = vec![
            ("/images/photos", vec!["photos"], true),
            ("/images/docs", vec!["photos"], false),
            ("/images", vec![], true),
            ("/images/2023/VACATION", vec!["vacation"], true),
            ("/images/vacations", vec!["vacation"], false),
        ];

        for (path, allow, expected) in cases {
            assert_eq!(
                should_process_folder(Path::new(path), &allow),
                expected,
                "path {} with allow {:?}",
                path,
                allow
            );
        }
    }

    #[test]
    fn test_ignore_takes_precedence() {
        let filter = DirectoryFilter::new(&["raw"], &["raw", "edited"]);

        assert!(filter.should_skip(Path::new("/shoot/raw")));
        assert!(filter.should_process(Path::new("/shoot/raw")));
        assert!(!filter.accepts(Path::new("/shoot/raw")));
        assert!(filter.accepts(Path::new("/shoot/edited")));
        assert!(!filter.accepts(Path::new("/shoot/other")));
    }

    #[test]
    fn test_filter_normalizes_tokens() {
        let filter = DirectoryFilter::new(&["Thumbs"], &[] as &[&str]);
        assert!(filter.should_skip(Path::new("gallery/THUMBS/small")));
        assert!(filter.accepts(Path::new("gallery/full")));
    }
}
