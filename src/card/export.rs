//! PNG encoding and card export.

use crate::error::CardError;
use image::{ImageFormat, RgbImage};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// File name used when the agent has no usable name.
pub const FALLBACK_FILE_NAME: &str = "agent_card.png";

/// `<name>_card.png`, with every character other than ASCII letters, digits,
/// `-` and `_` replaced by `_`.
pub fn card_file_name(agent_name: &str) -> String {
    let trimmed = agent_name.trim();
    if trimmed.is_empty() {
        return FALLBACK_FILE_NAME.to_string();
    }
    let stem: String = trimmed
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}_card.png", stem)
}

/// Encode `image` as PNG in memory.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, CardError> {
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

/// Write `bytes` to `path` through a temporary sibling file and a rename, so
/// readers never see a partial card.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), CardError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CardError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create output directory {:?}: {}", parent, e),
            ))
        })?;
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    fs::write(&temp_path, bytes).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        CardError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to write card to {:?}: {}", temp_path, e),
        ))
    })?;

    fs::rename(&temp_path, path).map_err(|e| {
        // Clean up temp file on error
        let _ = fs::remove_file(&temp_path);
        CardError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to rename temp file to {:?}: {}", path, e),
        ))
    })?;

    Ok(())
}

/// Encode `image` and write it to `dir/<name>_card.png`. Returns the written path.
pub fn export_png(image: &RgbImage, dir: &Path, agent_name: &str) -> Result<PathBuf, CardError> {
    let path = dir.join(card_file_name(agent_name));
    let bytes = encode_png(image)?;
    write_atomically(&path, &bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "Exported card");
    Ok(path)
}
