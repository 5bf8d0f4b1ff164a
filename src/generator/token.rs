//! Dialect-neutral output produced by the type walker

use crate::descriptor::Literal;

/// Type expression for a single field or element
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    String,
    Number,
    Boolean,
    /// Fallback for kinds with no mapping
    Unknown,
    /// Open string-keyed record of unknown values
    UnknownRecord,
    Array(Box<Token>),
    /// Element-level "or absent" wrapper
    Optional(Box<Token>),
    /// Named record or enum union emitted elsewhere in the output
    Reference(String),
    /// Reference to a named record whose definition follows the current one
    Deferred(String),
    /// Self-placeholder inside a recursive record
    SelfRef,
    /// Anonymous struct written in place
    Object(Vec<Property>),
}

/// A `name: token` pair of a record or inline object
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub token: Token,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub properties: Vec<Property>,
    /// Emitted through the self-referencing binding form
    pub recursive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnionMember {
    pub name: String,
    pub value: Literal,
}

/// Union of literals generated for an enum; members are sorted by name
#[derive(Debug, Clone, PartialEq)]
pub struct EnumUnion {
    pub name: String,
    pub members: Vec<UnionMember>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Record(Record),
    Union(EnumUnion),
}

impl Definition {
    pub fn name(&self) -> &str {
        match self {
            Definition::Record(record) => &record.name,
            Definition::Union(union) => &union.name,
        }
    }
}

/// Quote a property name unless it is a valid JavaScript identifier
pub fn format_property_name(name: &str) -> String {
    let mut chars = name.chars();
    let is_ident = match chars.next() {
        Some(first) => {
            (first == '_' || first == '$' || first.is_ascii_alphabetic())
                && chars.all(|c| c == '_' || c == '$' || c.is_ascii_alphanumeric())
        }
        None => false,
    };

    if is_ident {
        return name.to_string();
    }

    let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{}'", escaped)
}

/// Render a literal as a TypeScript expression
pub fn format_literal(value: &Literal) -> String {
    match value {
        // serde_json escapes exactly what a double-quoted JS string needs
        Literal::String(s) => {
            serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
        }
        Literal::Int(i) => i.to_string(),
        Literal::Float(f) if f.is_nan() => "NaN".to_string(),
        Literal::Float(f) if f.is_infinite() && *f > 0.0 => "Infinity".to_string(),
        Literal::Float(f) if f.is_infinite() => "-Infinity".to_string(),
        Literal::Float(f) => f.to_string(),
        Literal::Bool(b) => b.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers_are_left_alone() {
        assert_eq!(format_property_name("zip_code"), "zip_code");
        assert_eq!(format_property_name("$ref"), "$ref");
        assert_eq!(format_property_name("_id2"), "_id2");
    }

    #[test]
    fn test_non_identifiers_are_quoted() {
        assert_eq!(format_property_name("content-type"), "'content-type'");
        assert_eq!(format_property_name("2fa"), "'2fa'");
        assert_eq!(format_property_name(""), "''");
        assert_eq!(format_property_name("it's"), "'it\\'s'");
        assert_eq!(format_property_name("a\\b"), "'a\\\\b'");
    }

    #[test]
    fn test_literals() {
        assert_eq!(format_literal(&Literal::String("1".into())), "\"1\"");
        assert_eq!(format_literal(&Literal::String("say \"hi\"".into())), "\"say \\\"hi\\\"\"");
        assert_eq!(format_literal(&Literal::Int(-3)), "-3");
        assert_eq!(format_literal(&Literal::Float(2.5)), "2.5");
        assert_eq!(format_literal(&Literal::Bool(true)), "true");
        assert_eq!(format_literal(&Literal::Float(f64::INFINITY)), "Infinity");
    }
}
