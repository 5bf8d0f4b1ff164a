use std::fmt::Write;

use super::{indent, Dialect};
use crate::generator::token::{format_literal, format_property_name, EnumUnion, Property, Record, Token};

/// io-ts codecs: `export const XC = t.type({...})` plus `export type X`
#[derive(Debug, Clone, Copy, Default)]
pub struct IoTsDialect;

impl IoTsDialect {
    fn render_token(&self, token: &Token, level: usize) -> String {
        match token {
            Token::String => "t.string".to_string(),
            Token::Number => "t.number".to_string(),
            Token::Boolean => "t.boolean".to_string(),
            Token::Unknown => "t.unknown".to_string(),
            Token::UnknownRecord => "t.record(t.string, t.unknown)".to_string(),
            Token::Array(element) => format!("t.array({})", self.render_token(element, level)),
            Token::Optional(inner) => or_undefined(&self.render_token(inner, level)),
            Token::Reference(name) => format!("{}C", name),
            Token::Deferred(name) => format!("t.recursion('{}', () => {}C)", name, name),
            Token::SelfRef => "Self".to_string(),
            Token::Object(properties) if properties.is_empty() => "t.type({})".to_string(),
            Token::Object(properties) => format!(
                "t.type({{\n{}{}}})",
                self.render_properties(properties, level + 1),
                indent(level)
            ),
        }
    }

    fn render_properties(&self, properties: &[Property], level: usize) -> String {
        let mut content = String::new();
        for property in properties {
            let mut token = self.render_token(&property.token, level);
            if property.optional {
                token = or_undefined(&token);
            }
            // Writing to a String cannot fail
            let _ = writeln!(
                content,
                "{}{}: {},",
                indent(level),
                format_property_name(&property.name),
                token
            );
        }
        content
    }
}

fn or_undefined(token: &str) -> String {
    format!("t.union([{}, t.undefined])", token)
}

fn type_alias(name: &str) -> String {
    format!("export type {} = t.TypeOf<typeof {}C>;\n", name, name)
}

impl Dialect for IoTsDialect {
    fn name(&self) -> &'static str {
        "io-ts"
    }

    fn prelude(&self) -> Option<&'static str> {
        Some("import * as t from 'io-ts';")
    }

    fn render_record(&self, record: &Record) -> String {
        let mut content = String::new();

        if record.recursive {
            let _ = write!(
                content,
                "export const {name}C = t.recursion(\n  '{name}',\n  Self =>\n    t.type({{\n{fields}    }}),\n);\n",
                name = record.name,
                fields = self.render_properties(&record.properties, 3),
            );
        } else if record.properties.is_empty() {
            let _ = writeln!(content, "export const {}C = t.type({{}});", record.name);
        } else {
            let _ = write!(
                content,
                "export const {}C = t.type({{\n{}}});\n",
                record.name,
                self.render_properties(&record.properties, 1)
            );
        }

        content.push_str(&type_alias(&record.name));
        content
    }

    fn render_union(&self, union: &EnumUnion) -> String {
        let mut content = String::new();

        let constant_names: Vec<String> = union
            .members
            .iter()
            .map(|member| format!("{}{}", union.name, member.name))
            .collect();

        for (member, constant) in union.members.iter().zip(&constant_names) {
            let _ = writeln!(
                content,
                "export const {} = {} as const;",
                constant,
                format_literal(&member.value)
            );
        }
        if !union.members.is_empty() {
            content.push('\n');
        }

        match constant_names.as_slice() {
            [] => {
                let _ = writeln!(content, "export const {}C = t.never;", union.name);
            }
            // t.union needs at least two members
            [only] => {
                let _ = writeln!(content, "export const {}C = t.literal({});", union.name, only);
            }
            many => {
                let _ = writeln!(content, "export const {}C = t.union([", union.name);
                for constant in many {
                    let _ = writeln!(content, "  t.literal({}),", constant);
                }
                content.push_str("]);\n");
            }
        }

        content.push_str(&type_alias(&union.name));
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Literal;
    use crate::generator::token::UnionMember;

    fn property(name: &str, token: Token, optional: bool) -> Property {
        Property {
            name: name.to_string(),
            token,
            optional,
        }
    }

    #[test]
    fn test_render_plain_record() {
        let record = Record {
            name: "SimpleCase".to_string(),
            properties: vec![
                property("age", Token::Number, false),
                property("zip_code", Token::String, true),
            ],
            recursive: false,
        };

        assert_eq!(
            IoTsDialect.render_record(&record),
            "export const SimpleCaseC = t.type({\n  age: t.number,\n  zip_code: t.union([t.string, t.undefined]),\n});\nexport type SimpleCase = t.TypeOf<typeof SimpleCaseC>;\n"
        );
    }

    #[test]
    fn test_render_inline_object_indentation() {
        let record = Record {
            name: "Character".to_string(),
            properties: vec![property(
                "weapons",
                Token::Array(Box::new(Token::Object(vec![property("name", Token::String, false)]))),
                false,
            )],
            recursive: false,
        };

        let rendered = IoTsDialect.render_record(&record);
        assert!(rendered.contains("  weapons: t.array(t.type({\n    name: t.string,\n  })),\n"));
    }

    #[test]
    fn test_render_recursive_record() {
        let record = Record {
            name: "Node".to_string(),
            properties: vec![
                property("value", Token::Number, false),
                property("children", Token::Array(Box::new(Token::SelfRef)), false),
            ],
            recursive: true,
        };

        assert_eq!(
            IoTsDialect.render_record(&record),
            "export const NodeC = t.recursion(\n  'Node',\n  Self =>\n    t.type({\n      value: t.number,\n      children: t.array(Self),\n    }),\n);\nexport type Node = t.TypeOf<typeof NodeC>;\n"
        );
    }

    #[test]
    fn test_render_union() {
        let union = EnumUnion {
            name: "ExampleInt".to_string(),
            members: vec![
                UnionMember { name: "Code1".to_string(), value: Literal::Int(1) },
                UnionMember { name: "CodeTwo".to_string(), value: Literal::Int(2) },
            ],
        };

        assert_eq!(
            IoTsDialect.render_union(&union),
            "export const ExampleIntCode1 = 1 as const;\nexport const ExampleIntCodeTwo = 2 as const;\n\nexport const ExampleIntC = t.union([\n  t.literal(ExampleIntCode1),\n  t.literal(ExampleIntCodeTwo),\n]);\nexport type ExampleInt = t.TypeOf<typeof ExampleIntC>;\n"
        );
    }

    #[test]
    fn test_render_single_member_union_as_literal() {
        let union = EnumUnion {
            name: "Mode".to_string(),
            members: vec![UnionMember { name: "Only".to_string(), value: Literal::String("only".into()) }],
        };

        let rendered = IoTsDialect.render_union(&union);
        assert!(rendered.contains("export const ModeOnly = \"only\" as const;"));
        assert!(rendered.contains("export const ModeC = t.literal(ModeOnly);"));
    }
}
