use std::fs;
use std::path::Path;

use thiserror::Error;

/// Errors that can occur while loading configuration text.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to read the input file.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
}

/// An immutable-length, mutable-content sequence of configuration lines.
///
/// Line endings are normalized on construction: serial-console dumps carry
/// `\r\r\n` terminators, terminal captures carry `\r\n`, and both must become
/// plain `\n` before any structural matching happens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLines {
    lines: Vec<String>,
}

impl ConfigLines {
    /// Build from raw text, normalizing line endings and splitting into lines.
    pub fn from_text(text: &str) -> Self {
        let normalized = text.replace("\r\r\n", "\n").replace('\r', "");
        ConfigLines {
            lines: normalized.lines().map(str::to_string).collect(),
        }
    }

    /// Read a file and build from its contents.
    pub fn load_file(path: &Path) -> Result<Self, SourceError> {
        let text = fs::read_to_string(path)?;
        Ok(Self::from_text(&text))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Mutable access for in-place token rewriting passes.
    pub fn lines_mut(&mut self) -> &mut [String] {
        &mut self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
