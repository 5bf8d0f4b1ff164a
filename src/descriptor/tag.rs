/// Options carried by a field's `json` tag value, e.g. `name,omitempty`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonTag {
    /// External name; `None` when the tag is absent or names nothing
    pub name: Option<String>,
    pub omit_empty: bool,
    pub inline: bool,
    /// `json:"-"`
    pub skip: bool,
}

impl JsonTag {
    /// Parse the value of a `json` tag.
    ///
    /// `"-"` marks the field as skipped; `"-,"` names the field `-`.
    pub fn parse(value: &str) -> Self {
        if value == "-" {
            return JsonTag {
                skip: true,
                ..JsonTag::default()
            };
        }

        let mut parts = value.split(',');
        let name = parts
            .next()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        let mut tag = JsonTag {
            name,
            ..JsonTag::default()
        };
        for option in parts {
            match option.trim() {
                "omitempty" => tag.omit_empty = true,
                "inline" => tag.inline = true,
                _ => {}
            }
        }
        tag
    }

    pub fn named(name: impl Into<String>) -> Self {
        JsonTag {
            name: Some(name.into()),
            ..JsonTag::default()
        }
    }
}
