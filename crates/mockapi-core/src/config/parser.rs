//! Configuration file parsing (YAML/JSON/JSONC).

use crate::config::error::ConfigError;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Seed/config file format, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFileType {
    Yaml,
    Json,
    Jsonc,
}

impl ConfigFileType {
    /// Format for `path`, or `None` for an unsupported extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(ConfigFileType::Yaml),
            "json" => Some(ConfigFileType::Json),
            "jsonc" => Some(ConfigFileType::Jsonc),
            _ => None,
        }
    }
}

/// Strip `//` and `/* */` comments from JSONC content, leaving string
/// literals untouched. Line comments keep their terminating newline.
pub fn strip_json_comments(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            result.push(c);
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                result.push(c);
            }
            ('/', Some('/')) => {
                for next in chars.by_ref() {
                    if next == '\n' || next == '\r' {
                        result.push(next);
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => result.push(c),
        }
    }

    result
}

/// Parse config content in the format implied by `path`
pub fn parse_config<T: DeserializeOwned>(content: &str, path: &Path) -> Result<T, ConfigError> {
    let file_type = ConfigFileType::from_path(path)
        .ok_or_else(|| ConfigError::UnknownFileType(path.display().to_string()))?;
    let parsed = match file_type {
        ConfigFileType::Yaml => serde_yaml::from_str(content)?,
        ConfigFileType::Json => serde_json::from_str(content)?,
        ConfigFileType::Jsonc => serde_json::from_str(&strip_json_comments(content))?,
    };
    Ok(parsed)
}

/// Read and parse a single config file
pub fn read_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content, path)
}

/// Expand a glob pattern into the matching files, sorted by path.
///
/// Fails if the pattern matches nothing.
pub fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>, ConfigError> {
    let mut paths = Vec::new();
    for entry in glob::glob(pattern)? {
        let path = entry.map_err(|e| ConfigError::Io {
            path: e.path().to_path_buf(),
            source: e.into_error(),
        })?;
        if path.is_file() {
            paths.push(path);
        }
    }

    if paths.is_empty() {
        return Err(ConfigError::NoFiles(pattern.to_string()));
    }
    paths.sort();
    Ok(paths)
}
