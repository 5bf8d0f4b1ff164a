use std::fmt::Write;

use super::{indent, Dialect};
use crate::generator::token::{format_literal, format_property_name, EnumUnion, Property, Record, Token};

/// Plain TypeScript `interface` declarations
#[derive(Debug, Clone, Copy, Default)]
pub struct InterfaceDialect;

impl InterfaceDialect {
    /// `self_name` is what [`Token::SelfRef`] resolves to
    fn render_token(&self, token: &Token, level: usize, self_name: &str) -> String {
        match token {
            Token::String => "string".to_string(),
            Token::Number => "number".to_string(),
            Token::Boolean => "boolean".to_string(),
            Token::Unknown => "unknown".to_string(),
            Token::UnknownRecord => "Record<string, unknown>".to_string(),
            Token::Array(element) => {
                let rendered = self.render_token(element, level, self_name);
                match element.as_ref() {
                    Token::Optional(_) => format!("({})[]", rendered),
                    _ => format!("{}[]", rendered),
                }
            }
            Token::Optional(inner) => {
                format!("{} | undefined", self.render_token(inner, level, self_name))
            }
            Token::Reference(name) | Token::Deferred(name) => name.clone(),
            Token::SelfRef => self_name.to_string(),
            Token::Object(properties) if properties.is_empty() => "{}".to_string(),
            Token::Object(properties) => format!(
                "{{\n{}{}}}",
                self.render_properties(properties, level + 1, self_name),
                indent(level)
            ),
        }
    }

    fn render_properties(&self, properties: &[Property], level: usize, self_name: &str) -> String {
        let mut content = String::new();
        for property in properties {
            let marker = if property.optional { "?" } else { "" };
            let _ = writeln!(
                content,
                "{}{}{}: {};",
                indent(level),
                format_property_name(&property.name),
                marker,
                self.render_token(&property.token, level, self_name)
            );
        }
        content
    }
}

impl Dialect for InterfaceDialect {
    fn name(&self) -> &'static str {
        "interface"
    }

    fn prelude(&self) -> Option<&'static str> {
        None
    }

    fn render_record(&self, record: &Record) -> String {
        if record.properties.is_empty() {
            return format!("interface {} {{}}\n", record.name);
        }
        format!(
            "interface {} {{\n{}}}\n",
            record.name,
            self.render_properties(&record.properties, 1, &record.name)
        )
    }

    fn render_union(&self, union: &EnumUnion) -> String {
        let members: Vec<String> = union
            .members
            .iter()
            .map(|member| format_literal(&member.value))
            .collect();

        if members.is_empty() {
            return format!("type {} = never;\n", union.name);
        }
        format!("type {} = {};\n", union.name, members.join(" | "))
    }
}
