//! Writes the displayed image to disk.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use thiserror::Error;
use tracing::info;

use crate::domain::entities::{ImagePayload, InvalidPayload, PromptId};

#[derive(Debug, Error)]
pub enum SaveImageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Payload(#[from] InvalidPayload),
}

/// Saves image payloads into a fixed directory.
#[derive(Debug, Clone)]
pub struct SaveImageUseCase {
    dir: PathBuf,
}

impl SaveImageUseCase {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Writes the payload bytes, naming the file after the prompt id when known.
    ///
    /// # Errors
    /// Returns `SaveImageError` if the payload is not base64 or the directory
    /// or file cannot be written.
    pub fn execute(
        &self,
        image: &ImagePayload,
        prompt_id: Option<&PromptId>,
    ) -> Result<PathBuf, SaveImageError> {
        let stem = prompt_id.map_or_else(
            || Local::now().format("%Y%m%d-%H%M%S").to_string(),
            |id| sanitize(id.as_str()),
        );
        let bytes = image.decode()?;
        let path = self
            .dir
            .join(format!("genview-{stem}.{}", extension_for(&bytes)));

        write_atomically(&bytes, &path)?;
        Ok(path)
    }

    /// Writes the payload bytes to an exact path, replacing any existing file.
    ///
    /// # Errors
    /// Returns `SaveImageError` if the payload is not base64 or the file
    /// cannot be written.
    pub fn execute_at(image: &ImagePayload, path: &Path) -> Result<(), SaveImageError> {
        write_atomically(&image.decode()?, path)
    }
}

fn write_atomically(bytes: &[u8], path: &Path) -> Result<(), SaveImageError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(bytes)?;
    temp_file.persist(path).map_err(|e| e.error)?;

    info!(path = %path.display(), bytes = bytes.len(), "Image saved");
    Ok(())
}

fn extension_for(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .ok()
        .and_then(|format| format.extensions_str().first().copied())
        .unwrap_or("png")
}

fn sanitize(stem: &str) -> String {
    stem.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
