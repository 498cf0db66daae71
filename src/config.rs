use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Error;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    pub markdown: MarkdownConfig,
    pub html: HtmlConfig,
    pub limits: LimitsConfig,
}

/// Extensions enabled when compiling Markdown to HTML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Turn bare `http://`, `https://` and `www.` URLs into links.
    pub autolink: bool,
    pub strikethrough: bool,
    /// Escape raw HTML tags that are unsafe to pass through (`<script>`, `<title>`, ...).
    pub tagfilter: bool,
    pub tasklist: bool,
    pub table: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            autolink: true,
            strikethrough: true,
            tagfilter: true,
            tasklist: true,
            table: true,
        }
    }
}

/// Options handed to the HTML tree builder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HtmlConfig {
    pub drop_doctype: bool,
    pub scripting_enabled: bool,
    /// Report parse errors with full detail. Only affects diagnostics.
    pub exact_errors: bool,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            drop_doctype: true,
            scripting_enabled: false,
            exact_errors: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Nodes nested deeper than this below `<body>` are dropped.
    pub max_depth: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self { max_depth: 512 }
    }
}

impl Config {
    /// The configuration bundled with the crate.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load config from a TOML file, or return defaults if it can't be read or parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::debug!("Using compiled default config: {e}");
                Self::compiled_default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn compiled_default_matches_default_impls() {
        assert_eq!(Config::compiled_default(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[markdown]\ntable = false\n\n[limits]\nmax_depth = 8").unwrap();

        let config = Config::load(file.path()).unwrap();

        assert!(!config.markdown.table);
        assert!(config.markdown.tasklist);
        assert_eq!(config.limits.max_depth, 8);
        assert_eq!(config.html, HtmlConfig::default());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
        assert_eq!(Config::load_or_default(&path), Config::compiled_default());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[markdown\nautolink = ").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
