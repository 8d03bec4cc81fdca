//! Configuration loading.
//!
//! Settings come from an optional TOML file. Every key is optional and falls
//! back to the built-in defaults:
//!
//! ```toml
//! max_free_lines = 10
//! premium_codes = ["KLEENREFPRO"]
//! output_file_name = "kleenref_cleaned_references.txt"
//! ```

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "KLEENREF_CONFIG";

/// References a free user may clean per submission.
pub const DEFAULT_MAX_FREE_LINES: usize = 10;

/// File name used when output is downloaded without an explicit path.
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "kleenref_cleaned_references.txt";

const DEFAULT_PREMIUM_CODES: &[&str] = &["KLEENREFPRO", "MIRA2026", "SALPREMIUM"];

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Premium codes must not be empty")]
    EmptyCode,

    #[error("Output file name must not be empty")]
    EmptyFileName,
}

/// The set of accepted premium access codes, stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessCodes(BTreeSet<String>);

impl AccessCodes {
    /// Builds a code set, trimming and uppercasing each code.
    pub fn new<I, S>(codes: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for code in codes {
            let code = canonical_code(code.as_ref());
            if code.is_empty() {
                return Err(ConfigError::EmptyCode);
            }
            set.insert(code);
        }
        Ok(AccessCodes(set))
    }

    /// Returns true if `code` matches one of the accepted codes, ignoring
    /// case and surrounding whitespace.
    pub fn accepts(&self, code: &str) -> bool {
        let code = canonical_code(code);
        !code.is_empty() && self.0.contains(&code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for AccessCodes {
    fn default() -> Self {
        AccessCodes(DEFAULT_PREMIUM_CODES.iter().map(|c| c.to_string()).collect())
    }
}

fn canonical_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Free-tier ceiling on non-blank reference lines per submission.
    pub max_free_lines: usize,
    pub premium_codes: AccessCodes,
    pub output_file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_free_lines: DEFAULT_MAX_FREE_LINES,
            premium_codes: AccessCodes::default(),
            output_file_name: DEFAULT_OUTPUT_FILE_NAME.to_string(),
        }
    }
}

/// On-disk shape of the configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    max_free_lines: Option<usize>,
    premium_codes: Option<Vec<String>>,
    output_file_name: Option<String>,
}

/// Loads configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid TOML, or holds
/// an empty premium code or output file name.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses configuration from TOML text, filling in defaults for missing keys.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let raw: RawConfig = toml::from_str(content)?;
    let defaults = Config::default();

    let premium_codes = match raw.premium_codes {
        Some(codes) => AccessCodes::new(codes)?,
        None => defaults.premium_codes,
    };

    let output_file_name = match raw.output_file_name {
        Some(name) if name.trim().is_empty() => return Err(ConfigError::EmptyFileName),
        Some(name) => name,
        None => defaults.output_file_name,
    };

    Ok(Config {
        max_free_lines: raw.max_free_lines.unwrap_or(defaults.max_free_lines),
        premium_codes,
        output_file_name,
    })
}

/// Resolves the configuration for this run.
///
/// An explicit path wins, then the file named by `KLEENREF_CONFIG`. With
/// neither, the built-in defaults are returned.
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    match config_path(explicit, env::var_os(CONFIG_ENV).map(PathBuf::from)) {
        Some(path) => load_config(&path),
        None => Ok(Config::default()),
    }
}

fn config_path(explicit: Option<&Path>, from_env: Option<PathBuf>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| from_env.filter(|p| !p.as_os_str().is_empty()))
}
