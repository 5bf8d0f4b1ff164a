use log::{debug, warn};

use crate::descriptor::{EnumId, Field, PrimitiveKind, StructDef, StructId, TypeGraph, TypeKey, TypeRef};
use crate::generator::builder::{CodeBuilder, EmissionState};
use crate::generator::config::{Config, DialectKind, GeneratorOptions};
use crate::generator::dialect::{dialect_for, Dialect};
use crate::generator::token::{Definition, EnumUnion, Property, Record, Token, UnionMember};
use crate::generator::GenerateError;

/// Generates schema text for struct types.
///
/// The generator remembers which named types it has emitted. Reusing one
/// instance across calls emits each type at most once over all calls; use a
/// fresh instance for independent output.
pub struct TypeGenerator {
    dialect: Box<dyn Dialect>,
    options: GeneratorOptions,
    state: EmissionState,
}

impl TypeGenerator {
    pub fn new(kind: DialectKind, options: GeneratorOptions) -> Self {
        TypeGenerator::with_dialect(dialect_for(kind), options)
    }

    pub fn with_dialect(dialect: Box<dyn Dialect>, options: GeneratorOptions) -> Self {
        TypeGenerator {
            dialect,
            options,
            state: EmissionState::new(),
        }
    }

    pub fn io_ts(options: GeneratorOptions) -> Self {
        TypeGenerator::new(DialectKind::IoTs, options)
    }

    pub fn interface(options: GeneratorOptions) -> Self {
        TypeGenerator::new(DialectKind::Interface, options)
    }

    pub fn from_config(config: &Config) -> Self {
        TypeGenerator::new(config.dialect, config.options())
    }

    pub fn options(&self) -> GeneratorOptions {
        self.options
    }

    pub fn state(&self) -> &EmissionState {
        &self.state
    }

    /// Generate definitions for `root` and every named type reachable from it
    pub fn generate(&mut self, graph: &TypeGraph, root: &TypeRef) -> Result<String, GenerateError> {
        let definitions = self.collect(graph, root)?;

        let mut builder = CodeBuilder::new();
        builder.extend(definitions);
        Ok(builder.build(self.dialect.as_ref()))
    }

    /// Generate for a struct looked up by type name
    pub fn generate_named(&mut self, graph: &TypeGraph, name: &str) -> Result<String, GenerateError> {
        let id = graph
            .find_struct(name)
            .ok_or_else(|| GenerateError::NotAStruct(name.to_string()))?;
        self.generate(graph, &TypeRef::Struct(id))
    }

    /// Walk `root` and return the definitions it adds, in emission order
    pub fn collect(&mut self, graph: &TypeGraph, root: &TypeRef) -> Result<Vec<Definition>, GenerateError> {
        let id = match root.dereference() {
            TypeRef::Struct(id) if graph.get_struct(*id).is_some() => *id,
            other => return Err(GenerateError::NotAStruct(graph.describe(other))),
        };

        debug!("Generating {} definitions for {}", self.dialect.name(), graph.describe(root));

        let mut walk = Walk {
            graph,
            options: self.options,
            state: &mut self.state,
            builder: CodeBuilder::new(),
            in_progress: Vec::new(),
        };
        walk.visit_root(id);
        Ok(walk.builder.into_definitions())
    }
}

/// State of a single generate call
struct Walk<'a> {
    graph: &'a TypeGraph,
    options: GeneratorOptions,
    state: &'a mut EmissionState,
    builder: CodeBuilder,
    /// Structs currently being visited; cuts indirect and inline cycles
    in_progress: Vec<StructId>,
}

impl<'a> Walk<'a> {
    fn visit_root(&mut self, id: StructId) {
        match self.graph.get_struct(id) {
            Some(def) if def.is_anonymous() => {
                warn!("Root struct is anonymous; it has no name to emit");
            }
            Some(_) => self.visit_struct(id),
            None => {}
        }
    }

    /// Emit a named struct after its dependencies
    fn visit_struct(&mut self, id: StructId) {
        let graph = self.graph;
        let Some(def) = graph.get_struct(id) else {
            return;
        };
        let Some(key) = def.key() else {
            return;
        };
        if self.state.is_emitted(&key) || self.in_progress.contains(&id) {
            return;
        }

        self.in_progress.push(id);
        self.visit_dependencies(&def.fields, Some(&key));
        self.in_progress.pop();

        self.state.mark_emitted(key.clone());
        let record = self.build_record(def, &key);
        self.builder.add_definition(Definition::Record(record));
    }

    fn visit_dependencies(&mut self, fields: &[Field], owner: Option<&TypeKey>) {
        let graph = self.graph;

        for field in fields {
            if field.is_inline() {
                // Only the inlined type's own dependencies are emitted, never the type itself
                if let TypeRef::Struct(inner) = field.ty.dereference() {
                    if let Some(def) = graph.get_struct(*inner) {
                        if !self.in_progress.contains(inner) {
                            self.in_progress.push(*inner);
                            let inner_key = def.key();
                            self.visit_dependencies(&def.fields, inner_key.as_ref());
                            self.in_progress.pop();
                        }
                    }
                }
                continue;
            }
            if field.is_skipped() {
                continue;
            }
            self.visit_type(&field.ty, owner);
        }
    }

    fn visit_type(&mut self, ty: &TypeRef, owner: Option<&TypeKey>) {
        let graph = self.graph;
        let ty = ty.dereference();

        if let (Some(owner), Some(key)) = (owner, graph.key_of(ty)) {
            if &key == owner {
                return;
            }
        }

        match ty {
            TypeRef::Struct(id) => match graph.get_struct(*id) {
                Some(def) if def.is_anonymous() => {
                    if !self.in_progress.contains(id) {
                        self.in_progress.push(*id);
                        self.visit_dependencies(&def.fields, None);
                        self.in_progress.pop();
                    }
                }
                Some(_) => self.visit_struct(*id),
                None => {}
            },
            TypeRef::Slice(element) | TypeRef::Array(element, _) => self.visit_type(element, owner),
            TypeRef::Enum(id) => self.visit_enum(*id),
            _ => {}
        }
    }

    /// Emit the literal union of an enum once
    fn visit_enum(&mut self, id: EnumId) {
        let Some(def) = self.graph.get_enum(id) else {
            return;
        };
        if def.constants.is_empty() {
            return;
        }
        let key = def.key();
        if !self.state.mark_emitted(key) {
            return;
        }

        let mut members: Vec<UnionMember> = def
            .constants
            .iter()
            .map(|constant| UnionMember {
                name: constant.name.clone(),
                value: constant.value.clone(),
            })
            .collect();
        members.sort_by(|a, b| a.name.cmp(&b.name));

        self.builder.add_definition(Definition::Union(EnumUnion {
            name: def.name.clone(),
            members,
        }));
    }

    fn build_record(&mut self, def: &StructDef, key: &TypeKey) -> Record {
        let recursive = self.is_recursive(def, key);
        let self_key = if recursive { Some(key) } else { None };

        let mut properties = Vec::new();
        let mut inline_path = Vec::new();
        self.collect_properties(&def.fields, self_key, &mut properties, &mut inline_path);

        Record {
            name: def.name.clone(),
            properties,
            recursive,
        }
    }

    /// A struct is recursive when one of its emitted properties refers to it.
    ///
    /// Properties spliced in from inline fields and those written inside
    /// anonymous structs count as its own.
    fn is_recursive(&self, def: &StructDef, key: &TypeKey) -> bool {
        let mut visited = Vec::new();
        self.refers_to(&def.fields, key, &mut visited)
    }

    fn refers_to(&self, fields: &[Field], key: &TypeKey, visited: &mut Vec<StructId>) -> bool {
        let graph = self.graph;

        fields.iter().any(|field| {
            if field.is_skipped() {
                return false;
            }

            let ty = field.ty.dereference();
            let element = if field.is_inline() {
                None
            } else {
                ty.element().map(TypeRef::dereference)
            };
            let targets = [Some(ty), element];

            targets.into_iter().flatten().any(|target| {
                if graph.key_of(target).as_ref() == Some(key) {
                    return true;
                }
                let TypeRef::Struct(id) = target else {
                    return false;
                };
                let Some(nested) = graph.get_struct(*id) else {
                    return false;
                };
                if !(field.is_inline() || nested.is_anonymous()) || visited.contains(id) {
                    return false;
                }
                visited.push(*id);
                self.refers_to(&nested.fields, key, visited)
            })
        })
    }

    fn collect_properties(
        &mut self,
        fields: &[Field],
        self_key: Option<&TypeKey>,
        properties: &mut Vec<Property>,
        inline_path: &mut Vec<StructId>,
    ) {
        let graph = self.graph;

        for field in fields {
            if field.is_inline() {
                match field.ty.dereference() {
                    TypeRef::Struct(id) if !inline_path.contains(id) => {
                        if let Some(def) = graph.get_struct(*id) {
                            inline_path.push(*id);
                            self.collect_properties(&def.fields, self_key, properties, inline_path);
                            inline_path.pop();
                        }
                    }
                    TypeRef::Struct(_) => {
                        warn!("Inline field {} forms a cycle; skipping", field.name);
                    }
                    other => {
                        warn!(
                            "Inline field {} has non-struct type {}; skipping",
                            field.name,
                            graph.describe(other)
                        );
                    }
                }
                continue;
            }

            let Some(name) = field.external_name() else {
                debug!("Skipping field {} without an external name", field.name);
                continue;
            };
            if field.is_skipped() {
                debug!("Skipping field {}", field.name);
                continue;
            }

            properties.push(Property {
                name: name.to_string(),
                optional: self.is_optional(field),
                token: self.token(&field.ty, self_key),
            });
        }
    }

    /// Pointer, then `omitempty`, then arrays when configured
    fn is_optional(&self, field: &Field) -> bool {
        field.ty.is_pointer()
            || field.tag.omit_empty
            || (field.ty.is_sequence() && self.options.treat_arrays_as_optional)
    }

    fn token(&mut self, ty: &TypeRef, self_key: Option<&TypeKey>) -> Token {
        let graph = self.graph;
        let target = ty.dereference();

        if let (Some(self_key), Some(key)) = (self_key, graph.key_of(target)) {
            if &key == self_key {
                return Token::SelfRef;
            }
        }

        match target {
            TypeRef::Primitive(kind) => primitive_token(*kind),
            TypeRef::Interface => Token::Unknown,
            TypeRef::Map(key, value) if is_untyped_string_map(key, value) => Token::UnknownRecord,
            TypeRef::Map(..) => Token::Unknown,
            TypeRef::Slice(element) | TypeRef::Array(element, _) => {
                let inner = self.token(element, self_key);
                if element.is_pointer() {
                    Token::Array(Box::new(Token::Optional(Box::new(inner))))
                } else {
                    Token::Array(Box::new(inner))
                }
            }
            TypeRef::Struct(id) => match graph.get_struct(*id) {
                Some(def) if def.is_anonymous() => {
                    let mut properties = Vec::new();
                    let mut inline_path = vec![*id];
                    self.collect_properties(&def.fields, self_key, &mut properties, &mut inline_path);
                    Token::Object(properties)
                }
                Some(def) => {
                    self.visit_struct(*id);
                    match def.key() {
                        // Still on the walk stack: its definition comes later in the output
                        Some(key) if !self.state.is_emitted(&key) => Token::Deferred(def.name.clone()),
                        _ => Token::Reference(def.name.clone()),
                    }
                }
                None => Token::Unknown,
            },
            TypeRef::Enum(id) => match graph.get_enum(*id) {
                Some(def) if def.constants.is_empty() => primitive_token(def.underlying),
                Some(def) => {
                    self.visit_enum(*id);
                    Token::Reference(def.name.clone())
                }
                None => Token::Unknown,
            },
            TypeRef::Pointer(_) => Token::Unknown,
        }
    }
}

fn primitive_token(kind: PrimitiveKind) -> Token {
    match kind {
        PrimitiveKind::String => Token::String,
        PrimitiveKind::Bool => Token::Boolean,
        kind if kind.is_numeric() => Token::Number,
        _ => Token::Unknown,
    }
}

fn is_untyped_string_map(key: &TypeRef, value: &TypeRef) -> bool {
    matches!(key.dereference(), TypeRef::Primitive(PrimitiveKind::String))
        && matches!(value.dereference(), TypeRef::Interface)
}
