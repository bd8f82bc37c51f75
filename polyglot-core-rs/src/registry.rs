// polyglot-core-rs/src/registry.rs
//
// Name -> flow lookup. Populated once at startup, read-only afterwards and
// shared behind `Arc`.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use crate::error::RegistryError;
use crate::flow::FlowDefinition;
use crate::flows;

#[derive(Debug, Default)]
pub struct FlowRegistry {
    flows: HashMap<String, Arc<FlowDefinition>>,
}

impl FlowRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the correction, translation and summarization flows
    pub fn with_default_flows() -> Self {
        let mut registry = Self::new();
        for definition in flows::default_flows() {
            let name = definition.name().to_string();
            if registry.register(definition).is_err() {
                // Built-in names are distinct constants
                unreachable!("built-in flow {} registered twice", name);
            }
        }
        registry
    }

    /// Add a flow; an existing name is never overwritten
    pub fn register(&mut self, definition: FlowDefinition) -> Result<(), RegistryError> {
        let name = definition.name().to_string();
        if self.flows.contains_key(&name) {
            return Err(RegistryError::DuplicateFlow(name));
        }

        debug!("Registered flow '{}'", name);
        self.flows.insert(name, Arc::new(definition));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<Arc<FlowDefinition>, RegistryError> {
        self.flows
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Registered flow names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.flows.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }
}
