use std::collections::HashSet;

use log::debug;

use crate::descriptor::TypeKey;
use crate::generator::dialect::Dialect;
use crate::generator::token::Definition;

/// Keys of every named type already written by a generator instance
#[derive(Debug, Clone, Default)]
pub struct EmissionState {
    emitted: HashSet<TypeKey>,
}

impl EmissionState {
    pub fn new() -> Self {
        EmissionState::default()
    }

    pub fn is_emitted(&self, key: &TypeKey) -> bool {
        self.emitted.contains(key)
    }

    /// Returns `false` if the key was already marked
    pub fn mark_emitted(&mut self, key: TypeKey) -> bool {
        self.emitted.insert(key)
    }

    pub fn len(&self) -> usize {
        self.emitted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emitted.is_empty()
    }
}

/// Collects definitions in emission order and assembles the final text
#[derive(Debug, Default)]
pub struct CodeBuilder {
    definitions: Vec<Definition>,
}

impl CodeBuilder {
    pub fn new() -> Self {
        CodeBuilder::default()
    }

    pub fn add_definition(&mut self, definition: Definition) {
        debug!("Emitting definition {}", definition.name());
        self.definitions.push(definition);
    }

    /// Append definitions that were already emitted elsewhere
    pub fn extend(&mut self, definitions: Vec<Definition>) {
        self.definitions.extend(definitions);
    }

    pub fn into_definitions(self) -> Vec<Definition> {
        self.definitions
    }

    /// Render every collected definition after the dialect's prelude
    pub fn build(&self, dialect: &dyn Dialect) -> String {
        let mut output = String::new();

        if let Some(prelude) = dialect.prelude() {
            output.push_str(prelude);
            output.push_str("\n\n");
        }

        for (index, definition) in self.definitions.iter().enumerate() {
            if index > 0 {
                output.push('\n');
            }
            output.push_str(&dialect.render(definition));
        }

        output
    }
}
