//! Writing compiled documents

use std::fs;
use std::path::Path;

use crate::KefirError;

/// Write `html` to `path`, logging the outcome
pub fn write_document(path: &Path, html: &str) -> Result<(), KefirError> {
    match fs::write(path, html) {
        Ok(()) => {
            tracing::info!("Successfully wrote to {}", path.display());
            Ok(())
        }
        Err(source) => {
            tracing::error!("Failed to write {}: {}", path.display(), source);
            Err(KefirError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}
