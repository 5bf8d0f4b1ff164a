//! Schema generator
//!
//! This module walks a [`TypeGraph`] from a root struct and emits one
//! definition per distinct named type, in dependency order, in either the
//! io-ts or the plain interface dialect.

pub mod builder;
pub mod config;
pub mod dialect;
pub mod token;
pub mod walker;
pub mod writer;


use crate::descriptor::{TypeGraph, TypeRef};

pub use builder::{CodeBuilder, EmissionState};
pub use config::{Config, ConfigError, DialectKind, GeneratorOptions};
pub use dialect::{Dialect, InterfaceDialect, IoTsDialect};
pub use token::{Definition, Token};
pub use walker::TypeGenerator;
pub use writer::TypeScriptWriter;

/// Errors that can occur during generation
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("input is not a struct: {0}")]
    NotAStruct(String),
}

/// Generate io-ts codecs for `root` with a fresh generator
pub fn generate_io_ts(
    graph: &TypeGraph,
    root: &TypeRef,
    options: GeneratorOptions,
) -> Result<String, GenerateError> {
    TypeGenerator::io_ts(options).generate(graph, root)
}

/// Generate interface declarations for `root` with a fresh generator
pub fn generate_interfaces(
    graph: &TypeGraph,
    root: &TypeRef,
    options: GeneratorOptions,
) -> Result<String, GenerateError> {
    TypeGenerator::interface(options).generate(graph, root)
}

/// Generate several roots into one document.
///
/// A single generator is shared, so a type reachable from more than one root
/// is emitted once, under the first root that reaches it.
pub fn generate_many(
    graph: &TypeGraph,
    roots: &[TypeRef],
    config: &Config,
) -> Result<String, GenerateError> {
    let mut generator = TypeGenerator::from_config(config);
    let mut builder = CodeBuilder::new();

    for root in roots {
        builder.extend(generator.collect(graph, root)?);
    }

    let dialect = dialect::dialect_for(config.dialect);
    Ok(builder.build(dialect.as_ref()))
}
