//! Output dialects
//!
//! The walker produces dialect-neutral [`Definition`]s; a [`Dialect`] turns
//! each one into text.

mod interface;
mod io_ts;

pub use interface::InterfaceDialect;
pub use io_ts::IoTsDialect;

use crate::generator::config::DialectKind;
use crate::generator::token::{Definition, EnumUnion, Record};

/// Renders definitions in one target schema language
pub trait Dialect {
    /// Identifier used in configuration and logs
    fn name(&self) -> &'static str;

    /// Text placed once before all definitions
    fn prelude(&self) -> Option<&'static str>;

    fn render_record(&self, record: &Record) -> String;

    fn render_union(&self, union: &EnumUnion) -> String;

    fn render(&self, definition: &Definition) -> String {
        match definition {
            Definition::Record(record) => self.render_record(record),
            Definition::Union(union) => self.render_union(union),
        }
    }
}

/// Built-in dialect for a configured kind
pub fn dialect_for(kind: DialectKind) -> Box<dyn Dialect> {
    match kind {
        DialectKind::IoTs => Box::new(IoTsDialect),
        DialectKind::Interface => Box::new(InterfaceDialect),
    }
}

fn indent(level: usize) -> String {
    "  ".repeat(level)
}
