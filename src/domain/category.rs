//! Domain types representing the fixed category catalog.

use serde::{Deserialize, Serialize};

use crate::domain::common::{Displayable, NamedEntity};

/// A catalog entry: stable key plus display name and color.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryDefinition {
    pub key: String,
    pub name: String,
    pub color: String,
}

impl CategoryDefinition {
    pub fn new(key: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            color: color.into(),
        }
    }
}

impl NamedEntity for CategoryDefinition {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for CategoryDefinition {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.key)
    }
}

/// Ordered catalog of categories. Order drives the breakdown output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CategoryCatalog {
    entries: Vec<CategoryDefinition>,
}

impl CategoryCatalog {
    pub fn new(entries: Vec<CategoryDefinition>) -> Self {
        Self { entries }
    }

    pub fn lookup(&self, key: &str) -> Option<&CategoryDefinition> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryDefinition> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CategoryCatalog {
    /// The catalog shipped with the app.
    fn default() -> Self {
        Self::new(vec![
            CategoryDefinition::new("purchases", "Compras", "#5636D3"),
            CategoryDefinition::new("food", "Alimentação", "#FF872C"),
            CategoryDefinition::new("salary", "Salário", "#12A454"),
            CategoryDefinition::new("car", "Carro", "#E83F5B"),
            CategoryDefinition::new("leisure", "Lazer", "#26195C"),
            CategoryDefinition::new("studies", "Estudos", "#9C001A"),
        ])
    }
}
