use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Options that change how fields are emitted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    /// Emit every slice or array field as optional
    #[serde(default)]
    pub treat_arrays_as_optional: bool,
}

/// Output schema dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialectKind {
    /// `export const XC = t.type({...})` codecs plus `t.TypeOf` aliases
    #[serde(rename = "io-ts")]
    IoTs,

    /// Plain `interface X { ... }` declarations
    #[serde(rename = "interface")]
    Interface,
}

impl Default for DialectKind {
    fn default() -> Self {
        DialectKind::IoTs
    }
}

impl DialectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DialectKind::IoTs => "io-ts",
            DialectKind::Interface => "interface",
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DialectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "io-ts" => Ok(DialectKind::IoTs),
            "interface" => Ok(DialectKind::Interface),
            other => Err(format!("unknown dialect '{}'", other)),
        }
    }
}

/// Configuration file for the generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Output schema dialect
    #[serde(default)]
    pub dialect: DialectKind,

    /// Emit every slice or array field as optional
    #[serde(default)]
    pub treat_arrays_as_optional: bool,

    /// Output directory for generated files
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Whether to create output directories if they don't exist
    #[serde(default = "default_true")]
    pub create_dirs: bool,

    /// Extension appended to output names that have none (default: .ts)
    #[serde(default = "default_ts_extension")]
    pub file_extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dialect: DialectKind::default(),
            treat_arrays_as_optional: false,
            output_dir: default_output_dir(),
            create_dirs: default_true(),
            file_extension: default_ts_extension(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_output_dir() -> String {
    "generated".to_string()
}

fn default_ts_extension() -> String {
    ".ts".to_string()
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;

        Ok(())
    }

    pub fn options(&self) -> GeneratorOptions {
        GeneratorOptions {
            treat_arrays_as_optional: self.treat_arrays_as_optional,
        }
    }

    pub fn output_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.output_dir)
    }

    /// Append the configured extension to `name` unless it already has one
    pub fn output_file_name(&self, name: &str) -> String {
        if Path::new(name).extension().is_some() {
            name.to_string()
        } else {
            format!("{}{}", name, self.file_extension)
        }
    }
}

/// Error type for configuration operations
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "I/O error: {}", err),
            ConfigError::Parse(err) => write!(f, "Parse error: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
        }
    }
}
