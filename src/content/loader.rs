//! Loader for the RON character file at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::CharacterFile;

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Load a single RON struct from a file path.
pub fn load_character_file(path: &Path) -> Result<CharacterFile, ContentLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_character_file(&contents).map_err(|e| ContentLoadError {
        file: file_name,
        message: e.message,
    })
}

/// Parse a character file from an in-memory string.
pub fn parse_character_file(source: &str) -> Result<CharacterFile, ContentLoadError> {
    ron_options()
        .from_str(source)
        .map_err(|e| ContentLoadError {
            file: "<inline>".to_string(),
            message: format!("Parse error: {}", e),
        })
}
