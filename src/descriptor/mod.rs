//! Type descriptors consumed by the generator
//!
//! A [`TypeGraph`] is an arena of struct and enum definitions. Field types are
//! [`TypeRef`] values that point into the arena by id, so recursive and shared
//! types are plain data with no reference cycles.

mod tag;

pub use tag::JsonTag;

use std::fmt;

/// Index of a struct definition inside a [`TypeGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructId(usize);

/// Index of an enum definition inside a [`TypeGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnumId(usize);

/// Package-qualified name identifying a named type, e.g. `game.Character`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(String);

impl TypeKey {
    pub fn new(package: &str, name: &str) -> Self {
        TypeKey(format!("{}.{}", package, name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Built-in scalar kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
}

impl PrimitiveKind {
    /// Resolve a builtin type name, including the `byte` and `rune` aliases
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "bool" => PrimitiveKind::Bool,
            "int" => PrimitiveKind::Int,
            "int8" => PrimitiveKind::Int8,
            "int16" => PrimitiveKind::Int16,
            "int32" | "rune" => PrimitiveKind::Int32,
            "int64" => PrimitiveKind::Int64,
            "uint" => PrimitiveKind::Uint,
            "uint8" | "byte" => PrimitiveKind::Uint8,
            "uint16" => PrimitiveKind::Uint16,
            "uint32" => PrimitiveKind::Uint32,
            "uint64" => PrimitiveKind::Uint64,
            "uintptr" => PrimitiveKind::Uintptr,
            "float32" => PrimitiveKind::Float32,
            "float64" => PrimitiveKind::Float64,
            "complex64" => PrimitiveKind::Complex64,
            "complex128" => PrimitiveKind::Complex128,
            "string" => PrimitiveKind::String,
            _ => return None,
        };
        Some(kind)
    }

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Int8 => "int8",
            PrimitiveKind::Int16 => "int16",
            PrimitiveKind::Int32 => "int32",
            PrimitiveKind::Int64 => "int64",
            PrimitiveKind::Uint => "uint",
            PrimitiveKind::Uint8 => "uint8",
            PrimitiveKind::Uint16 => "uint16",
            PrimitiveKind::Uint32 => "uint32",
            PrimitiveKind::Uint64 => "uint64",
            PrimitiveKind::Uintptr => "uintptr",
            PrimitiveKind::Float32 => "float32",
            PrimitiveKind::Float64 => "float64",
            PrimitiveKind::Complex64 => "complex64",
            PrimitiveKind::Complex128 => "complex128",
            PrimitiveKind::String => "string",
        }
    }

    /// Integer and floating point widths; complex numbers are not numeric here
    pub fn is_numeric(self) -> bool {
        !matches!(
            self,
            PrimitiveKind::Bool
                | PrimitiveKind::String
                | PrimitiveKind::Complex64
                | PrimitiveKind::Complex128
        )
    }
}

/// The declared type of a field or element
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    Primitive(PrimitiveKind),
    Struct(StructId),
    Enum(EnumId),
    Pointer(Box<TypeRef>),
    Slice(Box<TypeRef>),
    Array(Box<TypeRef>, usize),
    Map(Box<TypeRef>, Box<TypeRef>),
    /// An untyped value (`interface{}` / `any`)
    Interface,
}

impl TypeRef {
    pub fn pointer(inner: TypeRef) -> Self {
        TypeRef::Pointer(Box::new(inner))
    }

    pub fn slice(element: TypeRef) -> Self {
        TypeRef::Slice(Box::new(element))
    }

    pub fn array(element: TypeRef, len: usize) -> Self {
        TypeRef::Array(Box::new(element), len)
    }

    pub fn map(key: TypeRef, value: TypeRef) -> Self {
        TypeRef::Map(Box::new(key), Box::new(value))
    }

    pub fn string() -> Self {
        TypeRef::Primitive(PrimitiveKind::String)
    }

    /// Strip every level of pointer indirection
    pub fn dereference(&self) -> &TypeRef {
        let mut current = self;
        while let TypeRef::Pointer(inner) = current {
            current = inner;
        }
        current
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, TypeRef::Pointer(_))
    }

    /// Slices and fixed-size arrays
    pub fn is_sequence(&self) -> bool {
        matches!(self, TypeRef::Slice(_) | TypeRef::Array(..))
    }

    /// Element type of a slice or array
    pub fn element(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::Slice(element) | TypeRef::Array(element, _) => Some(element),
            _ => None,
        }
    }
}

/// A single struct field
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Declared (server-side) field name
    pub name: String,
    pub ty: TypeRef,
    pub tag: JsonTag,
    /// Embedded field (Go struct embedding); flattened when it carries no tag name
    pub embedded: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeRef, tag: JsonTag) -> Self {
        Field {
            name: name.into(),
            ty,
            tag,
            embedded: false,
        }
    }

    pub fn embedded(name: impl Into<String>, ty: TypeRef) -> Self {
        Field {
            name: name.into(),
            ty,
            tag: JsonTag::default(),
            embedded: true,
        }
    }

    /// Serialized name taken from the tag, if any
    pub fn external_name(&self) -> Option<&str> {
        self.tag.name.as_deref().filter(|name| !name.is_empty())
    }

    /// Whether the field's own fields are spliced into the parent
    pub fn is_inline(&self) -> bool {
        if self.tag.skip {
            return false;
        }
        self.tag.inline || (self.embedded && self.external_name().is_none())
    }

    /// Fields that never appear in the output
    pub fn is_skipped(&self) -> bool {
        !self.is_inline() && (self.tag.skip || self.external_name().is_none())
    }
}

/// A struct definition; anonymous structs have an empty name
#[derive(Debug, Clone, PartialEq)]
pub struct StructDef {
    pub name: String,
    pub package: String,
    pub fields: Vec<Field>,
}

impl StructDef {
    pub fn new(name: impl Into<String>, package: impl Into<String>, fields: Vec<Field>) -> Self {
        StructDef {
            name: name.into(),
            package: package.into(),
            fields,
        }
    }

    pub fn anonymous(package: impl Into<String>, fields: Vec<Field>) -> Self {
        StructDef::new("", package, fields)
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }

    /// Unique key; `None` for anonymous structs, which are never deduplicated
    pub fn key(&self) -> Option<TypeKey> {
        if self.is_anonymous() {
            None
        } else {
            Some(TypeKey::new(&self.package, &self.name))
        }
    }
}

/// Literal value of an enum constant
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumConstant {
    pub name: String,
    pub value: Literal,
}

impl EnumConstant {
    pub fn new(name: impl Into<String>, value: Literal) -> Self {
        EnumConstant {
            name: name.into(),
            value,
        }
    }
}

/// A named primitive with a closed set of constants
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDef {
    pub name: String,
    pub package: String,
    pub underlying: PrimitiveKind,
    pub constants: Vec<EnumConstant>,
}

impl EnumDef {
    pub fn new(
        name: impl Into<String>,
        package: impl Into<String>,
        underlying: PrimitiveKind,
        constants: Vec<EnumConstant>,
    ) -> Self {
        EnumDef {
            name: name.into(),
            package: package.into(),
            underlying,
            constants,
        }
    }

    pub fn key(&self) -> TypeKey {
        TypeKey::new(&self.package, &self.name)
    }
}

/// Arena holding every struct and enum reachable from a schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeGraph {
    structs: Vec<StructDef>,
    enums: Vec<EnumDef>,
}

impl TypeGraph {
    pub fn new() -> Self {
        TypeGraph::default()
    }

    pub fn add_struct(&mut self, def: StructDef) -> StructId {
        self.structs.push(def);
        StructId(self.structs.len() - 1)
    }

    /// Reserve an id before the fields are known, for self-referencing types
    pub fn declare_struct(&mut self, name: impl Into<String>, package: impl Into<String>) -> StructId {
        self.add_struct(StructDef::new(name, package, Vec::new()))
    }

    /// Replace the fields of a previously declared struct.
    /// Returns `false` when the id does not belong to this graph.
    pub fn set_fields(&mut self, id: StructId, fields: Vec<Field>) -> bool {
        match self.structs.get_mut(id.0) {
            Some(def) => {
                def.fields = fields;
                true
            }
            None => false,
        }
    }

    pub fn add_enum(&mut self, def: EnumDef) -> EnumId {
        self.enums.push(def);
        EnumId(self.enums.len() - 1)
    }

    pub fn get_struct(&self, id: StructId) -> Option<&StructDef> {
        self.structs.get(id.0)
    }

    pub fn get_enum(&self, id: EnumId) -> Option<&EnumDef> {
        self.enums.get(id.0)
    }

    /// Find a named struct by its type name
    pub fn find_struct(&self, name: &str) -> Option<StructId> {
        self.structs
            .iter()
            .position(|def| !def.is_anonymous() && def.name == name)
            .map(StructId)
    }

    pub fn find_enum(&self, name: &str) -> Option<EnumId> {
        self.enums.iter().position(|def| def.name == name).map(EnumId)
    }

    pub fn struct_count(&self) -> usize {
        self.structs.len()
    }

    pub fn enum_count(&self) -> usize {
        self.enums.len()
    }

    /// Key of the named type behind `ty` after pointer indirection is removed
    pub fn key_of(&self, ty: &TypeRef) -> Option<TypeKey> {
        match ty.dereference() {
            TypeRef::Struct(id) => self.get_struct(*id).and_then(StructDef::key),
            TypeRef::Enum(id) => self.get_enum(*id).map(EnumDef::key),
            _ => None,
        }
    }

    /// Go-like rendering of a type, used in diagnostics
    pub fn describe(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Primitive(kind) => kind.name().to_string(),
            TypeRef::Struct(id) => match self.get_struct(*id) {
                Some(def) if def.is_anonymous() => "struct {...}".to_string(),
                Some(def) => def.name.clone(),
                None => "<unknown struct>".to_string(),
            },
            TypeRef::Enum(id) => self
                .get_enum(*id)
                .map(|def| def.name.clone())
                .unwrap_or_else(|| "<unknown enum>".to_string()),
            TypeRef::Pointer(inner) => format!("*{}", self.describe(inner)),
            TypeRef::Slice(element) => format!("[]{}", self.describe(element)),
            TypeRef::Array(element, len) => format!("[{}]{}", len, self.describe(element)),
            TypeRef::Map(key, value) => {
                format!("map[{}]{}", self.describe(key), self.describe(value))
            }
            TypeRef::Interface => "interface {}".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dereference_strips_all_pointers() {
        let ty = TypeRef::pointer(TypeRef::pointer(TypeRef::string()));
        assert_eq!(ty.dereference(), &TypeRef::string());
        assert!(ty.is_pointer());
        assert!(!ty.dereference().is_pointer());
    }

    #[test]
    fn test_field_visibility_rules() {
        let named = Field::new("Age", TypeRef::Primitive(PrimitiveKind::Int), JsonTag::parse("age"));
        assert!(!named.is_skipped());
        assert!(!named.is_inline());

        let untagged = Field::new("Secret", TypeRef::string(), JsonTag::default());
        assert!(untagged.is_skipped());

        let dashed = Field::new("Internal", TypeRef::string(), JsonTag::parse("-"));
        assert!(dashed.is_skipped());

        let inline = Field::new("Base", TypeRef::string(), JsonTag::parse(",inline"));
        assert!(inline.is_inline());
        assert!(!inline.is_skipped());

        let embedded = Field::embedded("Quest", TypeRef::string());
        assert!(embedded.is_inline());
    }

    #[test]
    fn test_keys_and_lookup() {
        let mut graph = TypeGraph::new();
        let node = graph.declare_struct("Node", "tree");
        let anon = graph.add_struct(StructDef::anonymous("tree", Vec::new()));
        let level = graph.add_enum(EnumDef::new("Level", "tree", PrimitiveKind::Int, Vec::new()));

        assert_eq!(graph.find_struct("Node"), Some(node));
        assert_eq!(graph.find_enum("Level"), Some(level));
        assert_eq!(
            graph.key_of(&TypeRef::pointer(TypeRef::Struct(node))),
            Some(TypeKey::new("tree", "Node"))
        );
        assert_eq!(graph.key_of(&TypeRef::Struct(anon)), None);
        assert_eq!(graph.key_of(&TypeRef::slice(TypeRef::Struct(node))), None);
        assert_eq!(graph.key_of(&TypeRef::Enum(level)).unwrap().as_str(), "tree.Level");
    }

    #[test]
    fn test_describe() {
        let mut graph = TypeGraph::new();
        let child = graph.declare_struct("Child", "family");
        let ty = TypeRef::slice(TypeRef::pointer(TypeRef::Struct(child)));
        assert_eq!(graph.describe(&ty), "[]*Child");
        assert_eq!(
            graph.describe(&TypeRef::map(TypeRef::string(), TypeRef::Interface)),
            "map[string]interface {}"
        );
    }
}
