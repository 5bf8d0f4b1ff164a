use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Location { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Failure inside a single type expression or struct tag; `column` is 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexError {
    pub column: usize,
}

/// Represents all possible errors that can occur while reading a schema document
#[derive(Debug)]
pub enum ParseError {
    /// The document is not valid JSON or does not match the expected layout
    InvalidDocument(String, Location),
    /// A field's type expression could not be parsed
    InvalidTypeExpression {
        field: String,
        expression: String,
        column: usize,
    },
    /// A field's struct tag could not be parsed
    InvalidTag {
        field: String,
        tag: String,
        column: usize,
    },
    /// Unknown type referenced
    UnknownType { field: String, name: String },
    /// Two structs or enums share a name
    DuplicateDefinition(String),
    /// `struct` used in a type expression without a `struct` body
    MissingStructBody(String),
    /// Enum declared over something other than a builtin scalar
    InvalidEnumType { name: String, ty: String },
    /// Enum constant whose value is not a string, number or boolean
    InvalidConstant { name: String, constant: String },
}

impl ParseError {
    pub fn message(&self) -> String {
        match self {
            ParseError::InvalidDocument(msg, loc) => format!("Invalid document at {}: {}", loc, msg),
            ParseError::InvalidTypeExpression {
                field,
                expression,
                column,
            } => format!(
                "Invalid type expression '{}' for field {} at column {}",
                expression, field, column
            ),
            ParseError::InvalidTag { field, tag, column } => {
                format!("Invalid struct tag '{}' for field {} at column {}", tag, field, column)
            }
            ParseError::UnknownType { field, name } => {
                format!("Unknown type '{}' referenced by field {}", name, field)
            }
            ParseError::DuplicateDefinition(name) => format!("Duplicate definition: {}", name),
            ParseError::MissingStructBody(field) => {
                format!("Field {} uses an anonymous struct without a body", field)
            }
            ParseError::InvalidEnumType { name, ty } => {
                format!("Enum {} must have a builtin scalar type, found '{}'", name, ty)
            }
            ParseError::InvalidConstant { name, constant } => format!(
                "Constant {} of enum {} must be a string, number or boolean",
                constant, name
            ),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl Error for ParseError {}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        let location = Location::new(err.line(), err.column());
        ParseError::InvalidDocument(err.to_string(), location)
    }
}

/// A Result type specialized for parser operations
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let error = ParseError::UnknownType {
            field: "Character.Pet".to_string(),
            name: "Dragon".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Unknown type 'Dragon' referenced by field Character.Pet"
        );
    }

    #[test]
    fn test_json_error_keeps_location() {
        let err = serde_json::from_str::<serde_json::Value>("{\n  \"structs\": [,]\n}").unwrap_err();
        match ParseError::from(err) {
            ParseError::InvalidDocument(_, location) => assert_eq!(location.line, 2),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
