//! Markdown file discovery by filesystem walking.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A markdown file discovered during a scan.
#[derive(Debug, Clone)]
pub struct MarkdownFile {
    /// Absolute path to the file.
    pub path: PathBuf,
    /// File name including extension.
    pub file_name: String,
    /// File size in bytes.
    pub size: u64,
    /// Last modification time.
    pub modified: SystemTime,
}

impl MarkdownFile {
    /// File name without the `.md` extension, used as the default title.
    #[must_use]
    pub fn stem(&self) -> String {
        Path::new(&self.file_name)
            .file_stem()
            .map_or_else(|| self.file_name.clone(), |s| s.to_string_lossy().into_owned())
    }
}

/// Recursively collect `.md` files (case-insensitive) under `dir`.
///
/// Hidden files and directories are skipped. Unreadable directories are
/// silently ignored, matching scan-phase semantics: failures surface later,
/// when a file is actually read. Results are sorted by path so batch runs
/// are deterministic.
#[must_use]
pub fn scan(dir: &Path) -> Vec<MarkdownFile> {
    let mut files = Vec::new();
    scan_directory(dir, &mut files);
    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}

fn scan_directory(dir: &Path, files: &mut Vec<MarkdownFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.filter_map(Result::ok) {
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if file_name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            scan_directory(&path, files);
        } else if path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("md"))
        {
            let Ok(metadata) = entry.metadata() else {
                continue;
            };
            let absolute = fs::canonicalize(&path).unwrap_or(path);
            files.push(MarkdownFile {
                path: absolute,
                file_name,
                size: metadata.len(),
                modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            });
        }
    }
}
