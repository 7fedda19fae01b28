use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A parsed content block as handed over by the rendering pipeline.
///
/// Mirrors the usual `{ "blockName": "...", "attrs": { ... } }` shape; the name is
/// optional because freeform content has none.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default, rename = "blockName")]
    pub name: Option<String>,
    #[serde(default)]
    pub attrs: Map<String, Value>,
}

impl Block {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), attrs: Map::new() }
    }

    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// True when the block name starts with one of `prefixes` (e.g. `"stackable/"`).
    pub fn in_namespace<S: AsRef<str>>(&self, prefixes: &[S]) -> bool {
        self.name().is_some_and(|name| {
            prefixes.iter().map(AsRef::as_ref).any(|prefix| !prefix.is_empty() && name.starts_with(prefix))
        })
    }
}
