//! Struct to io-ts Schema Converter
//!
//! This library turns descriptions of Go-style structs and enums into
//! TypeScript schema text. It includes a parser for JSON schema documents,
//! a type descriptor graph, and a generator that emits either io-ts codecs
//! or plain TypeScript interfaces.

use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

use log::info;

pub mod descriptor;
pub mod generator;
pub mod parser;
pub mod utils;

use generator::{Config, ConfigError, GenerateError, TypeGenerator};
use parser::ParseError;

/// Errors that can occur during the conversion process
#[derive(Debug)]
pub enum ConversionError {
    FileReadError(std::io::Error),
    ParseError(ParseError),
    GenerationError(GenerateError),
    Config(ConfigError),
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::FileReadError(err) => write!(f, "File read error: {}", err),
            ConversionError::ParseError(err) => write!(f, "Parse error: {}", err),
            ConversionError::GenerationError(err) => write!(f, "Generation error: {}", err),
            ConversionError::Config(err) => write!(f, "Configuration error: {}", err),
        }
    }
}

impl Error for ConversionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConversionError::FileReadError(err) => Some(err),
            ConversionError::ParseError(err) => Some(err),
            ConversionError::GenerationError(err) => Some(err),
            ConversionError::Config(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ConversionError {
    fn from(err: std::io::Error) -> Self {
        ConversionError::FileReadError(err)
    }
}

impl From<ParseError> for ConversionError {
    fn from(err: ParseError) -> Self {
        ConversionError::ParseError(err)
    }
}

impl From<GenerateError> for ConversionError {
    fn from(err: GenerateError) -> Self {
        ConversionError::GenerationError(err)
    }
}

impl From<ConfigError> for ConversionError {
    fn from(err: ConfigError) -> Self {
        ConversionError::Config(err)
    }
}

/// Convert schema document text, generating from the struct named `root`
pub fn convert_schema(input: &str, root: &str, config: &Config) -> Result<String, ConversionError> {
    let graph = parser::parse_schema(input)?;
    let mut generator = TypeGenerator::from_config(config);
    Ok(generator.generate_named(&graph, root)?)
}

/// Convert a schema document file to TypeScript
///
/// This function reads a schema document, parses it, and generates the
/// definitions reachable from `root` in the configured dialect.
///
/// # Arguments
///
/// * `input_path` - Path to the JSON schema document
/// * `root` - Name of the struct to generate from
/// * `config` - Dialect and field options
///
/// # Errors
///
/// Returns a `ConversionError` if any step of the process fails.
pub fn convert_schema_file<P: AsRef<Path>>(
    input_path: P,
    root: &str,
    config: &Config,
) -> Result<String, ConversionError> {
    let input_content = fs::read_to_string(input_path.as_ref())?;
    info!("Read schema from {}", input_path.as_ref().display());

    convert_schema(&input_content, root, config)
}
