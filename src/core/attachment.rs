//! Local file selection for the attach menu.
//!
//! Files are filtered by the menu's type hint and forwarded to the
//! attachment handler by path. Nothing is read or uploaded.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::core::types::AttachmentKind;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp", "svg"];
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("cannot list {path}: {source}")]
    List {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AttachmentKind {
    /// Whether a file path satisfies this type hint.
    pub fn accepts(self, path: &Path) -> bool {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match self {
            AttachmentKind::Any => true,
            AttachmentKind::Image => ext.is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.as_str())),
            AttachmentKind::Document => {
                ext.is_some_and(|e| DOCUMENT_EXTENSIONS.contains(&e.as_str()))
            }
        }
    }
}

/// List regular files in `dir` accepted by `kind`, sorted by file name.
/// Hidden files are skipped.
pub fn list_candidates(dir: &Path, kind: AttachmentKind) -> Result<Vec<PathBuf>, AttachmentError> {
    let entries = fs::read_dir(dir).map_err(|source| AttachmentError::List {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            !path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with('.'))
        })
        .filter(|path| kind.accepts(path))
        .collect();
    files.sort();

    debug!(
        "Attachment candidates in {} for {:?}: {}",
        dir.display(),
        kind,
        files.len()
    );
    Ok(files)
}

/// Display name of a selected file.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
