//! Job graph configuration.
//!
//! [`GraphConfig`] is deserialized from JSON. Every section defaults sensibly
//! so a completely empty `{}` file is valid and reproduces the built-in
//! behavior (`.mkv` outputs are Matroska, everything else is passthrough).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::HashSet;
use std::path::Path;

use crate::error::Result;
use crate::format::FormatId;
use crate::Error;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration for building job graphs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub formats: FormatsConfig,
    pub output: OutputConfig,
}

impl GraphConfig {
    /// Deserialize a `GraphConfig` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        tracing::info!("Loaded graph config from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None`, the file does not exist, or it fails to parse.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match Self::load(path) {
            Ok(config) => config,
            Err(Error::Io { source }) if source.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No graph config at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to load graph config {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Intern every format this configuration names, so lookups by string
    /// later resolve to the same tokens.
    pub fn register_formats(&self) {
        for name in self.formats.extra.iter().chain(self.formats.extensions.values()) {
            FormatId::intern(name);
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    ///
    /// Formats count as known when they are built in or listed in
    /// `formats.extra`; names interned elsewhere in the process do not.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let mut seen = HashSet::new();

        for (ext, format) in &self.formats.extensions {
            if ext.is_empty() {
                warnings.push("formats.extensions contains an empty extension".into());
                continue;
            }
            if ext.starts_with('.') {
                warnings.push(format!(
                    "formats.extensions '{ext}' should not start with a dot"
                ));
            }
            let folded = ext.trim_start_matches('.').to_lowercase();
            if !seen.insert(folded.clone()) {
                warnings.push(format!(
                    "formats.extensions '{ext}' duplicates extension '{folded}'"
                ));
            }
            let known = FormatId::builtin(format).is_some()
                || self.formats.extra.iter().any(|name| name == format);
            if !known {
                warnings.push(format!(
                    "formats.extensions '{ext}' maps to unregistered format '{format}'"
                ));
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Format registration and extension-based guessing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatsConfig {
    /// File extension (without dot, case-insensitive) to canonical container
    /// format string. Unlisted extensions resolve to passthrough.
    pub extensions: BTreeMap<String, String>,
    /// Additional format names to register up front.
    pub extra: Vec<String>,
}

impl Default for FormatsConfig {
    fn default() -> Self {
        let mut extensions = BTreeMap::new();
        extensions.insert("mkv".to_string(), FormatId::MATROSKA.as_str().to_string());
        Self {
            extensions,
            extra: Vec::new(),
        }
    }
}

/// Job document rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty_json: true }
    }
}
