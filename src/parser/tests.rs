#[cfg(test)]
mod tests {
    use crate::descriptor::{Literal, PrimitiveKind, TypeRef};
    use crate::parser::{parse_schema, ParseError};

    #[test]
    fn test_parse_simple_struct() {
        let schema = r#"
            {
                "package": "models",
                "structs": [
                    {
                        "name": "Simple",
                        "fields": [
                            { "name": "Name", "type": "string", "tag": "json:\"name\"" },
                            { "name": "Age", "type": "int", "json": "age" },
                            { "name": "Active", "type": "*bool", "tag": "json:\"active,omitempty\" yaml:\"active\"" }
                        ]
                    }
                ]
            }
        "#;

        let result = parse_schema(schema);
        assert!(result.is_ok());

        let graph = result.unwrap();
        let id = graph.find_struct("Simple").unwrap();
        let def = graph.get_struct(id).unwrap();
        assert_eq!(def.package, "models");
        assert_eq!(def.fields.len(), 3);

        let fields = &def.fields;
        assert_eq!(fields[0].ty, TypeRef::Primitive(PrimitiveKind::String));
        assert_eq!(fields[0].external_name(), Some("name"));

        assert_eq!(fields[1].ty, TypeRef::Primitive(PrimitiveKind::Int));
        assert_eq!(fields[1].external_name(), Some("age"));

        assert_eq!(fields[2].ty, TypeRef::pointer(TypeRef::Primitive(PrimitiveKind::Bool)));
        assert!(fields[2].tag.omit_empty);
    }

    #[test]
    fn test_forward_and_self_references() {
        let schema = r#"
            {
                "structs": [
                    {
                        "name": "Parent",
                        "fields": [
                            { "name": "Children", "type": "[]*Child", "json": "children" },
                            { "name": "Next", "type": "*Parent", "json": "next" }
                        ]
                    },
                    { "name": "Child", "fields": [{ "name": "Name", "type": "string", "json": "name" }] }
                ]
            }
        "#;

        let graph = parse_schema(schema).unwrap();
        let parent = graph.find_struct("Parent").unwrap();
        let child = graph.find_struct("Child").unwrap();
        let fields = &graph.get_struct(parent).unwrap().fields;

        assert_eq!(fields[0].ty, TypeRef::slice(TypeRef::pointer(TypeRef::Struct(child))));
        assert_eq!(fields[1].ty, TypeRef::pointer(TypeRef::Struct(parent)));
        assert_eq!(graph.describe(&fields[0].ty), "[]*Child");
    }

    #[test]
    fn test_qualified_names_and_default_package() {
        let schema = r#"
            {
                "structs": [
                    { "name": "Item", "package": "inventory", "fields": [] },
                    { "name": "Bag", "fields": [{ "name": "Items", "type": "[]inventory.Item", "json": "items" }] }
                ]
            }
        "#;

        let graph = parse_schema(schema).unwrap();
        let bag = graph.get_struct(graph.find_struct("Bag").unwrap()).unwrap();
        assert_eq!(bag.package, "main");
        assert_eq!(
            bag.fields[0].ty,
            TypeRef::slice(TypeRef::Struct(graph.find_struct("Item").unwrap()))
        );
    }

    #[test]
    fn test_parse_enums() {
        let schema = r#"
            {
                "package": "fixtures",
                "enums": [
                    {
                        "name": "ExampleString",
                        "type": "string",
                        "constants": [
                            { "name": "ExampleString1", "value": "1" },
                            { "name": "ExampleStringTwo", "value": "2" }
                        ]
                    },
                    {
                        "name": "ExampleInt",
                        "type": "int",
                        "constants": [{ "name": "Code1", "value": 1 }, { "name": "Ratio", "value": 1.5 }]
                    }
                ],
                "structs": [
                    { "name": "Example", "fields": [{ "name": "Kind", "type": "ExampleString", "json": "kind" }] }
                ]
            }
        "#;

        let graph = parse_schema(schema).unwrap();
        let string_enum = graph.find_enum("ExampleString").unwrap();
        let def = graph.get_enum(string_enum).unwrap();
        assert_eq!(def.underlying, PrimitiveKind::String);
        assert_eq!(def.constants[1].value, Literal::String("2".to_string()));

        let int_enum = graph.get_enum(graph.find_enum("ExampleInt").unwrap()).unwrap();
        assert_eq!(int_enum.constants[0].value, Literal::Int(1));
        assert_eq!(int_enum.constants[1].value, Literal::Float(1.5));

        let example = graph.get_struct(graph.find_struct("Example").unwrap()).unwrap();
        assert_eq!(example.fields[0].ty, TypeRef::Enum(string_enum));
    }

    #[test]
    fn test_anonymous_struct_body() {
        let schema = r#"
            {
                "structs": [
                    {
                        "name": "Game",
                        "fields": [
                            {
                                "name": "Quests",
                                "type": "[]struct",
                                "json": "quests",
                                "struct": { "fields": [{ "name": "Title", "type": "string", "json": "title" }] }
                            }
                        ]
                    }
                ]
            }
        "#;

        let graph = parse_schema(schema).unwrap();
        let game = graph.get_struct(graph.find_struct("Game").unwrap()).unwrap();
        let inner = match game.fields[0].ty.element() {
            Some(TypeRef::Struct(id)) => graph.get_struct(*id).unwrap(),
            other => panic!("expected anonymous struct element, got {:?}", other),
        };
        assert!(inner.is_anonymous());
        assert_eq!(inner.fields[0].external_name(), Some("title"));
    }

    #[test]
    fn test_embedded_field_without_tag_is_inline() {
        let schema = r#"
            {
                "structs": [
                    { "name": "Base", "fields": [{ "name": "ID", "type": "string", "json": "id" }] },
                    { "name": "User", "fields": [{ "name": "Base", "type": "Base", "embedded": true }] }
                ]
            }
        "#;

        let graph = parse_schema(schema).unwrap();
        let user = graph.get_struct(graph.find_struct("User").unwrap()).unwrap();
        assert!(user.fields[0].is_inline());
    }

    #[test]
    fn test_unknown_type() {
        let schema = r#"{ "structs": [{ "name": "A", "fields": [{ "name": "B", "type": "*Missing" }] }] }"#;

        match parse_schema(schema) {
            Err(ParseError::UnknownType { field, name }) => {
                assert_eq!(field, "A.B");
                assert_eq!(name, "Missing");
            }
            other => panic!("expected unknown type error, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_definition() {
        let schema = r#"
            {
                "structs": [{ "name": "A", "fields": [] }],
                "enums": [{ "name": "A", "type": "string", "constants": [] }]
            }
        "#;

        assert!(matches!(parse_schema(schema), Err(ParseError::DuplicateDefinition(name)) if name == "A"));
    }

    #[test]
    fn test_invalid_type_expression_and_tag() {
        let bad_type = r#"{ "structs": [{ "name": "A", "fields": [{ "name": "B", "type": "map[string" }] }] }"#;
        assert!(matches!(
            parse_schema(bad_type),
            Err(ParseError::InvalidTypeExpression { .. })
        ));

        let bad_tag = r#"{ "structs": [{ "name": "A", "fields": [{ "name": "B", "type": "int", "tag": "json:\"b" }] }] }"#;
        assert!(matches!(parse_schema(bad_tag), Err(ParseError::InvalidTag { .. })));
    }

    #[test]
    fn test_missing_struct_body() {
        let schema = r#"{ "structs": [{ "name": "A", "fields": [{ "name": "B", "type": "struct" }] }] }"#;
        assert!(matches!(parse_schema(schema), Err(ParseError::MissingStructBody(field)) if field == "A.B"));
    }

    #[test]
    fn test_invalid_enum_definitions() {
        let bad_type = r#"{ "enums": [{ "name": "E", "type": "[]string", "constants": [] }] }"#;
        assert!(matches!(parse_schema(bad_type), Err(ParseError::InvalidEnumType { .. })));

        let bad_constant = r#"{ "enums": [{ "name": "E", "type": "string", "constants": [{ "name": "X", "value": null }] }] }"#;
        assert!(matches!(
            parse_schema(bad_constant),
            Err(ParseError::InvalidConstant { name, constant }) if name == "E" && constant == "X"
        ));
    }

    #[test]
    fn test_invalid_document() {
        assert!(matches!(parse_schema("not json"), Err(ParseError::InvalidDocument(..))));
        assert!(matches!(
            parse_schema(r#"{ "structs": [{ "fields": [] }] }"#),
            Err(ParseError::InvalidDocument(..))
        ));
    }
}
