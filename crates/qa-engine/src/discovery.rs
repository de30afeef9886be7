//! Discovery of feature files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use qa_lib::EngineError;
use walkdir::WalkDir;

/// Folder searched when the caller names none.
pub const DEFAULT_FOLDER: &str = "features";

const FEATURE_EXTENSION: &str = "feature";

/// Collect the feature files under `root`.
///
/// A file path is returned as-is, whatever its extension. A directory is
/// walked recursively for `*.feature` files, sorted by path.
///
/// # Errors
///
/// Returns [`EngineError::NotFound`] if `root` does not exist and
/// [`EngineError::Io`] if it cannot be read.
pub fn discover(root: &Path) -> Result<Vec<PathBuf>, EngineError> {
    let metadata = fs::metadata(root).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            EngineError::NotFound(root.to_path_buf())
        } else {
            EngineError::Io {
                path: root.to_path_buf(),
                source,
            }
        }
    })?;
    if metadata.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| EngineError::Io {
            path: e.path().unwrap_or(root).to_path_buf(),
            source: io::Error::from(e),
        })?;
        let is_feature = entry
            .path()
            .extension()
            .is_some_and(|ext| ext == FEATURE_EXTENSION);
        if entry.file_type().is_file() && is_feature {
            files.push(entry.into_path());
        }
    }
    tracing::debug!(root = %root.display(), count = files.len(), "Discovered feature files");
    Ok(files)
}
