//! Parser module for struct schema documents
//!
//! A schema document is JSON listing Go structs and enums. Field types are
//! written as Go type expressions and field tags as Go struct tags; both are
//! parsed with nom in [`lexer`]. The result is a [`TypeGraph`] the generator
//! walks.

pub mod document;
pub mod error;
pub mod lexer;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use log::debug;
use serde_json::Value;

use crate::descriptor::{
    EnumConstant, EnumDef, EnumId, Field, JsonTag, Literal, PrimitiveKind, StructDef, StructId,
    TypeGraph, TypeKey, TypeRef,
};
use document::{ConstantDocument, EnumDocument, FieldDocument, SchemaDocument};
pub use error::{Location, ParseError, ParseResult};
use lexer::{lookup_tag, parse_struct_tag, parse_type_expression, TypeExpr};

/// Parse a schema document into a type graph
///
/// Structs are declared before any field is resolved, so fields may refer
/// to structs declared later in the document, to their own struct, or to
/// structs that refer back to them.
///
/// # Arguments
///
/// * `input` - JSON text of the schema document
///
/// # Returns
///
/// * `Result<TypeGraph, ParseError>` - The resolved graph, or the first
///   error found in document order
pub fn parse_schema(input: &str) -> ParseResult<TypeGraph> {
    let document: SchemaDocument = serde_json::from_str(input)?;
    build_graph(&document)
}

/// Resolve an already deserialized document
pub fn build_graph(document: &SchemaDocument) -> ParseResult<TypeGraph> {
    let mut resolver = Resolver::new(&document.package);
    resolver.declare(document)?;
    resolver.resolve(document)?;

    debug!(
        "Parsed schema with {} structs and {} enums",
        resolver.graph.struct_count(),
        resolver.graph.enum_count()
    );
    Ok(resolver.graph)
}

#[derive(Debug, Clone, Copy)]
enum Named {
    Struct(StructId),
    Enum(EnumId),
}

struct Resolver<'a> {
    default_package: &'a str,
    graph: TypeGraph,
    /// Keyed by both `Name` and `package.Name`
    names: HashMap<String, Named>,
}

impl<'a> Resolver<'a> {
    fn new(default_package: &'a str) -> Self {
        Resolver {
            default_package,
            graph: TypeGraph::new(),
            names: HashMap::new(),
        }
    }

    fn package_of(&self, package: &'a Option<String>) -> &'a str {
        package.as_deref().unwrap_or(self.default_package)
    }

    fn register(&mut self, name: &str, package: &str, named: Named) -> ParseResult<()> {
        let key = TypeKey::new(package, name);
        if self.names.contains_key(key.as_str()) || self.names.contains_key(name) {
            return Err(ParseError::DuplicateDefinition(name.to_string()));
        }
        self.names.insert(name.to_string(), named);
        self.names.insert(key.to_string(), named);
        Ok(())
    }

    /// First pass: reserve ids for every struct and build every enum
    fn declare(&mut self, document: &'a SchemaDocument) -> ParseResult<()> {
        for def in &document.enums {
            let package = self.package_of(&def.package);
            let enum_def = self.enum_def(def, package)?;
            let id = self.graph.add_enum(enum_def);
            self.register(&def.name, package, Named::Enum(id))?;
        }

        for def in &document.structs {
            let package = self.package_of(&def.package);
            let id = self.graph.declare_struct(def.name.as_str(), package);
            self.register(&def.name, package, Named::Struct(id))?;
        }
        Ok(())
    }

    /// Second pass: resolve every field now that all names are known
    fn resolve(&mut self, document: &'a SchemaDocument) -> ParseResult<()> {
        for def in &document.structs {
            let package = self.package_of(&def.package);
            let fields = self.resolve_fields(&def.fields, package, &def.name)?;

            if let Some(Named::Struct(id)) = self.names.get(&def.name).copied() {
                self.graph.set_fields(id, fields);
            }
        }
        Ok(())
    }

    fn enum_def(&self, def: &EnumDocument, package: &str) -> ParseResult<EnumDef> {
        let underlying = PrimitiveKind::from_name(def.underlying.trim()).ok_or_else(|| {
            ParseError::InvalidEnumType {
                name: def.name.clone(),
                ty: def.underlying.clone(),
            }
        })?;

        let constants = def
            .constants
            .iter()
            .map(|constant| enum_constant(&def.name, constant))
            .collect::<ParseResult<Vec<_>>>()?;

        Ok(EnumDef::new(def.name.as_str(), package, underlying, constants))
    }

    fn resolve_fields(
        &mut self,
        fields: &[FieldDocument],
        package: &str,
        owner: &str,
    ) -> ParseResult<Vec<Field>> {
        fields
            .iter()
            .map(|field| self.resolve_field(field, package, owner))
            .collect()
    }

    fn resolve_field(&mut self, field: &FieldDocument, package: &str, owner: &str) -> ParseResult<Field> {
        let path = format!("{}.{}", owner, field.name);

        let expr = parse_type_expression(&field.ty).map_err(|err| ParseError::InvalidTypeExpression {
            field: path.clone(),
            expression: field.ty.clone(),
            column: err.column,
        })?;
        let ty = self.resolve_type(&expr, field, package, &path)?;
        let tag = field_tag(field, &path)?;

        Ok(Field {
            name: field.name.clone(),
            ty,
            tag,
            embedded: field.embedded,
        })
    }

    fn resolve_type(
        &mut self,
        expr: &TypeExpr<'_>,
        field: &FieldDocument,
        package: &str,
        path: &str,
    ) -> ParseResult<TypeRef> {
        let ty = match expr {
            TypeExpr::Pointer(inner) => TypeRef::pointer(self.resolve_type(inner, field, package, path)?),
            TypeExpr::Slice(element) => TypeRef::slice(self.resolve_type(element, field, package, path)?),
            TypeExpr::Array(len, element) => {
                TypeRef::array(self.resolve_type(element, field, package, path)?, *len)
            }
            TypeExpr::Map(key, value) => TypeRef::map(
                self.resolve_type(key, field, package, path)?,
                self.resolve_type(value, field, package, path)?,
            ),
            TypeExpr::Interface => TypeRef::Interface,
            TypeExpr::AnonymousStruct => {
                let body = field
                    .body
                    .as_ref()
                    .ok_or_else(|| ParseError::MissingStructBody(path.to_string()))?;
                let fields = self.resolve_fields(&body.fields, package, path)?;
                TypeRef::Struct(self.graph.add_struct(StructDef::anonymous(package, fields)))
            }
            TypeExpr::Named { package: None, name } => match PrimitiveKind::from_name(name) {
                Some(kind) => TypeRef::Primitive(kind),
                None => self.lookup(name, path)?,
            },
            TypeExpr::Named {
                package: Some(qualifier),
                name,
            } => self.lookup(&format!("{}.{}", qualifier, name), path)?,
        };
        Ok(ty)
    }

    fn lookup(&self, name: &str, path: &str) -> ParseResult<TypeRef> {
        match self.names.get(name) {
            Some(Named::Struct(id)) => Ok(TypeRef::Struct(*id)),
            Some(Named::Enum(id)) => Ok(TypeRef::Enum(*id)),
            None => Err(ParseError::UnknownType {
                field: path.to_string(),
                name: name.to_string(),
            }),
        }
    }
}

/// The `json` shorthand wins over a raw tag; a raw tag without a `json` key yields the default
fn field_tag(field: &FieldDocument, path: &str) -> ParseResult<JsonTag> {
    if let Some(json) = &field.json {
        return Ok(JsonTag::parse(json));
    }

    match &field.tag {
        Some(raw) => {
            let pairs = parse_struct_tag(raw).map_err(|err| ParseError::InvalidTag {
                field: path.to_string(),
                tag: raw.clone(),
                column: err.column,
            })?;
            Ok(lookup_tag(&pairs, "json").map(JsonTag::parse).unwrap_or_default())
        }
        None => Ok(JsonTag::default()),
    }
}

fn enum_constant(enum_name: &str, constant: &ConstantDocument) -> ParseResult<EnumConstant> {
    let value = match &constant.value {
        Value::String(s) => Literal::String(s.clone()),
        Value::Bool(b) => Literal::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Literal::Int(i),
            None => match n.as_f64() {
                Some(f) => Literal::Float(f),
                None => return Err(invalid_constant(enum_name, constant)),
            },
        },
        _ => return Err(invalid_constant(enum_name, constant)),
    };
    Ok(EnumConstant::new(constant.name.as_str(), value))
}

fn invalid_constant(enum_name: &str, constant: &ConstantDocument) -> ParseError {
    ParseError::InvalidConstant {
        name: enum_name.to_string(),
        constant: constant.name.clone(),
    }
}
