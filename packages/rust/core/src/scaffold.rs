//! Output directory scaffolding.

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use sdkdocs_shared::{DocGenError, Result};

use crate::layout::{DocLayout, STATIC_DIR, TEMPLATES_DIR};

/// Wipe the output directory and (re)create the Sphinx source structure.
///
/// Safe to run repeatedly. A failed deletion is logged and scaffolding
/// carries on; failing to create a directory is an error.
#[instrument(skip_all, fields(source = %layout.source_dir.display()))]
pub fn scaffold(layout: &DocLayout) -> Result<()> {
    if let Some(output) = &layout.output_dir {
        info!(path = %output.display(), "cleaning output directory");
        if output.exists() {
            if let Err(e) = std::fs::remove_dir_all(output) {
                warn!(path = %output.display(), error = %e, "error cleaning output directory");
            }
        }
        create_dir(output)?;
    }

    let dirs = [
        layout.source_dir.clone(),
        layout.source_dir.join(STATIC_DIR),
        layout.source_dir.join(TEMPLATES_DIR),
    ];
    for dir in &dirs {
        create_dir(dir)?;
    }

    debug!("sphinx structure created");
    Ok(())
}

/// `create_dir_all` with path context.
pub(crate) fn create_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| DocGenError::io(dir, e))
}

/// Write a UTF-8 text file, creating parent directories.
pub(crate) fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir(parent)?;
    }
    std::fs::write(path, content).map_err(|e| DocGenError::io(path, e))?;
    debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}
