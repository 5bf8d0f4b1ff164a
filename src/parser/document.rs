//! Serde model of a schema document.
//!
//! ```json
//! {
//!   "package": "models",
//!   "structs": [
//!     {
//!       "name": "Character",
//!       "fields": [
//!         { "name": "Name", "type": "string", "tag": "json:\"name\"" },
//!         { "name": "Pet", "type": "*Pet", "json": "pet,omitempty" }
//!       ]
//!     }
//!   ],
//!   "enums": [
//!     {
//!       "name": "Color",
//!       "type": "string",
//!       "constants": [{ "name": "ColorRed", "value": "red" }]
//!     }
//!   ]
//! }
//! ```

use serde::Deserialize;
use serde_json::Value;

fn default_package() -> String {
    "main".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
    /// Package assumed by every definition that does not name its own
    #[serde(default = "default_package")]
    pub package: String,

    #[serde(default)]
    pub structs: Vec<StructDocument>,

    #[serde(default)]
    pub enums: Vec<EnumDocument>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StructDocument {
    pub name: String,

    #[serde(default)]
    pub package: Option<String>,

    #[serde(default)]
    pub fields: Vec<FieldDocument>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDocument {
    pub name: String,

    /// Go type expression, e.g. `[]*Child`
    #[serde(rename = "type")]
    pub ty: String,

    /// Raw struct tag, e.g. `json:"name,omitempty"`
    #[serde(default)]
    pub tag: Option<String>,

    /// Shorthand for the value of the `json` tag key; wins over `tag`
    #[serde(default)]
    pub json: Option<String>,

    #[serde(default)]
    pub embedded: bool,

    /// Body for a `struct` appearing in `ty`
    #[serde(default, rename = "struct")]
    pub body: Option<AnonymousStructDocument>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnonymousStructDocument {
    #[serde(default)]
    pub fields: Vec<FieldDocument>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumDocument {
    pub name: String,

    #[serde(default)]
    pub package: Option<String>,

    #[serde(rename = "type")]
    pub underlying: String,

    #[serde(default)]
    pub constants: Vec<ConstantDocument>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstantDocument {
    pub name: String,
    pub value: Value,
}
