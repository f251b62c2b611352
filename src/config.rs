//! Pipeline options
//!
//! Options can be built in code or read from a JSON file:
//!
//! ```json
//! {
//!     "localeDir": "locale",
//!     "defaultLocale": "en",
//!     "domain": "messages"
//! }
//! ```
//!
//! A relative `localeDir` read from a file is resolved against the file's
//! directory.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Catalog file stem used when `domain` is not configured
pub const DEFAULT_DOMAIN: &str = "messages";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Options {
    /// Root directory holding one subdirectory per locale
    pub locale_dir: Option<PathBuf>,
    /// Locale whose outputs keep the original path
    pub default_locale: Option<String>,
    /// Catalog file stem, `messages` loads `LC_MESSAGES/messages.mo`
    pub domain: Option<String>,
    /// Custom regex locating message keys; see [`crate::extract::PatternExtractor`]
    pub pattern: Option<String>,
}

impl Options {
    pub fn new(locale_dir: impl Into<PathBuf>) -> Self {
        Options {
            locale_dir: Some(locale_dir.into()),
            ..Default::default()
        }
    }

    pub fn with_default_locale(mut self, locale: &str) -> Self {
        self.default_locale = Some(locale.to_string());
        self
    }

    pub fn with_domain(mut self, domain: &str) -> Self {
        self.domain = Some(domain.to_string());
        self
    }

    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.pattern = Some(pattern.to_string());
        self
    }

    /// Load options from a JSON file
    ///
    /// # Errors
    /// - File read errors
    /// - Invalid JSON or unknown keys
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut options: Options = serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!(
                "Failed to parse options from '{}': {}",
                path.display(),
                e
            ))
        })?;

        if let (Some(dir), Some(parent)) = (options.locale_dir.as_mut(), path.parent()) {
            if dir.is_relative() {
                *dir = parent.join(&*dir);
            }
        }

        Ok(options)
    }

    /// The configured locale root, required by every translator
    pub fn locale_dir(&self) -> Result<&Path> {
        self.locale_dir
            .as_deref()
            .ok_or_else(|| Error::configuration("localeDir is required"))
    }

    pub fn domain(&self) -> &str {
        self.domain.as_deref().unwrap_or(DEFAULT_DOMAIN)
    }
}
