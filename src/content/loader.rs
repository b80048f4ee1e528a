//! Content domain: startup loading of the RON data files.

use std::fs;
use std::path::{Path, PathBuf};

use ron::Options;
use serde::de::DeserializeOwned;

use super::data::{AiDefaults, ArchetypeDef, DataFile};

/// A content file that could not be read or parsed.
#[derive(Debug)]
pub struct ContentLoadError {
    pub path: PathBuf,
    pub message: String,
}

impl ContentLoadError {
    fn new(path: &Path, message: String) -> Self {
        Self {
            path: path.to_path_buf(),
            message,
        }
    }
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to load {}: {}", self.path.display(), self.message)
    }
}

/// Read one RON value from disk. IMPLICIT_SOME keeps optional fields terse
/// in the data files (`dwell_before_rush: 3.0` instead of `Some(3.0)`).
fn read_ron<T: DeserializeOwned>(path: &Path) -> Result<T, ContentLoadError> {
    let text = fs::read_to_string(path)
        .map_err(|e| ContentLoadError::new(path, format!("read failed: {e}")))?;
    Options::default()
        .with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
        .from_str(&text)
        .map_err(|e| ContentLoadError::new(path, format!("parse failed: {e}")))
}

/// Load the archetype roster and gameplay defaults from `assets/data`.
///
/// Never panics: each file that fails contributes an error and a safe
/// stand-in, so the caller can log everything and keep running on the
/// built-in roster.
pub fn load_all_content(
    base_path: &Path,
) -> Result<(Vec<ArchetypeDef>, AiDefaults), Vec<ContentLoadError>> {
    let mut errors = Vec::new();

    let archetypes = read_ron::<DataFile<ArchetypeDef>>(&base_path.join("archetypes.ron"))
        .map(|file| file.items)
        .unwrap_or_else(|e| {
            errors.push(e);
            Vec::new()
        });

    let defaults = read_ron::<AiDefaults>(&base_path.join("ai_defaults.ron")).unwrap_or_else(|e| {
        errors.push(e);
        AiDefaults::default()
    });

    if errors.is_empty() {
        Ok((archetypes, defaults))
    } else {
        Err(errors)
    }
}
