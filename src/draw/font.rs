//! Font loading for text shapes.

use ab_glyph::FontVec;
use std::path::Path;

use crate::error::ConfigurationError;

/// Load a TrueType/OpenType font from disk.
pub fn load_font(path: &Path) -> Result<FontVec, ConfigurationError> {
    let font_error = |reason: String| ConfigurationError::Font {
        path: path.to_path_buf(),
        reason,
    };

    let bytes = std::fs::read(path).map_err(|e| font_error(e.to_string()))?;
    let font = FontVec::try_from_vec(bytes).map_err(|e| font_error(e.to_string()))?;
    log::debug!("Loaded font {}", path.display());
    Ok(font)
}
