//! Reader configuration: which document stages to parse.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GigawordError, Result};

/// Stage toggles for [`crate::DocumentReader`].
///
/// Every stage is parsed by default. A disabled stage is never built: its
/// subtree is skipped while the XML is read, and the matching document
/// field holds its empty value.
///
/// Skipping relaxes well-formedness checks inside the disabled element only
/// for character content: bad entity references or escapes there go
/// unnoticed. Tag nesting is still checked, so mismatched tags fail the
/// document whatever the options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadOptions {
    #[serde(default = "default_true")]
    pub parse_headline: bool,
    #[serde(default = "default_true")]
    pub parse_dateline: bool,
    #[serde(default = "default_true")]
    pub parse_coreferences: bool,
    #[serde(default = "default_true")]
    pub parse_sentences: bool,
    #[serde(default = "default_true")]
    pub parse_text: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            parse_headline: true,
            parse_dateline: true,
            parse_coreferences: true,
            parse_sentences: true,
            parse_text: true,
        }
    }
}

impl ReadOptions {
    /// Only id, type and date; every optional stage disabled.
    pub fn metadata_only() -> Self {
        Self {
            parse_headline: false,
            parse_dateline: false,
            parse_coreferences: false,
            parse_sentences: false,
            parse_text: false,
        }
    }

    pub fn with_headline(mut self, enabled: bool) -> Self {
        self.parse_headline = enabled;
        self
    }

    pub fn with_dateline(mut self, enabled: bool) -> Self {
        self.parse_dateline = enabled;
        self
    }

    pub fn with_coreferences(mut self, enabled: bool) -> Self {
        self.parse_coreferences = enabled;
        self
    }

    pub fn with_sentences(mut self, enabled: bool) -> Self {
        self.parse_sentences = enabled;
        self
    }

    pub fn with_text(mut self, enabled: bool) -> Self {
        self.parse_text = enabled;
        self
    }

    /// Whether the `<DOC>` child with this tag name should be built.
    ///
    /// Tags without a stage toggle are always kept.
    pub fn wants(&self, tag: &str) -> bool {
        match tag {
            "HEADLINE" => self.parse_headline,
            "DATELINE" => self.parse_dateline,
            "coreferences" => self.parse_coreferences,
            "sentences" => self.parse_sentences,
            "TEXT" => self.parse_text,
            _ => true,
        }
    }

    /// Load options from a file.
    /// The format follows the extension: TOML, YAML, otherwise JSON.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| GigawordError::Config(format!("Failed to read config file: {}", e)))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

        let options: ReadOptions = match ext {
            "toml" => toml::from_str(&contents)
                .map_err(|e| GigawordError::Config(format!("Failed to parse TOML config: {}", e)))?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .map_err(|e| GigawordError::Config(format!("Failed to parse YAML config: {}", e)))?,
            _ => serde_json::from_str(&contents)
                .map_err(|e| GigawordError::Config(format!("Failed to parse JSON config: {}", e)))?,
        };

        Ok(options.with_env_overrides())
    }

    /// Apply `GIGAWORD_SKIP_*` environment overrides.
    pub fn with_env_overrides(mut self) -> Self {
        // GIGAWORD_SKIP_HEADLINE=1 disables headline parsing, and so on
        if env_flag("GIGAWORD_SKIP_HEADLINE") {
            self.parse_headline = false;
        }
        if env_flag("GIGAWORD_SKIP_DATELINE") {
            self.parse_dateline = false;
        }
        if env_flag("GIGAWORD_SKIP_COREFERENCES") {
            self.parse_coreferences = false;
        }
        if env_flag("GIGAWORD_SKIP_SENTENCES") {
            self.parse_sentences = false;
        }
        if env_flag("GIGAWORD_SKIP_TEXT") {
            self.parse_text = false;
        }
        self
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name).map(|v| is_truthy(&v)).unwrap_or(false)
}

fn is_truthy(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
