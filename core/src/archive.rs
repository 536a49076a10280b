//! The bundled reference archive — the application's read-only data source.
//!
//! Five category datasets (origins, classes, skills, equipment, rituals)
//! plus the attribute table are embedded at compile time and parsed once at
//! startup. Listings are sorted by display name with locale-aware
//! collation; lookups by id never fail hard — an unknown category yields an
//! empty list and an unknown id yields `None`.

use std::collections::HashMap;

use crate::collate;
use crate::types::{Attribute, Record};


// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// The top-level groupings of the bundled dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Origins,
    Classes,
    Skills,
    Equipment,
    Rituals,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Origins,
        Category::Classes,
        Category::Skills,
        Category::Equipment,
        Category::Rituals,
    ];

    /// The stable key used in selections and lookups.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Origins => "origins",
            Category::Classes => "classes",
            Category::Skills => "skills",
            Category::Equipment => "equipment",
            Category::Rituals => "rituals",
        }
    }

    /// Display label for menu listings.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Origins => "Origins",
            Category::Classes => "Classes",
            Category::Skills => "Skills",
            Category::Equipment => "Equipment",
            Category::Rituals => "Rituals",
        }
    }

    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.key() == key)
    }
}


// ---------------------------------------------------------------------------
// Archive
// ---------------------------------------------------------------------------

/// The immutable category → records store, plus the attribute table.
pub struct Archive {
    categories: HashMap<String, Vec<Record>>,
    attributes: Vec<Attribute>,
}

impl Archive {
    /// Create an empty archive. Mainly useful as a builder seed.
    pub fn new() -> Self {
        Archive {
            categories: HashMap::new(),
            attributes: Vec::new(),
        }
    }

    /// Load the datasets bundled with the binary.
    pub fn bundled() -> Result<Archive, String> {
        let archive = Archive::new()
            .with_category(
                Category::Origins.key(),
                parse_dataset("origins", include_str!("../data/origins.json"))?,
            )
            .with_category(
                Category::Classes.key(),
                parse_dataset("classes", include_str!("../data/classes.json"))?,
            )
            .with_category(
                Category::Skills.key(),
                parse_dataset("skills", include_str!("../data/skills.json"))?,
            )
            .with_category(
                Category::Equipment.key(),
                parse_dataset("equipment", include_str!("../data/equipment.json"))?,
            )
            .with_category(
                Category::Rituals.key(),
                parse_dataset("rituals", include_str!("../data/rituals.json"))?,
            )
            .with_attributes(parse_attributes(include_str!("../data/attributes.json"))?);
        Ok(archive)
    }

    /// Seed a category. Replaces any previous records under the same key.
    pub fn with_category(mut self, key: &str, records: Vec<Record>) -> Self {
        self.categories.insert(key.to_string(), records);
        self
    }

    /// Seed the attribute table.
    pub fn with_attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }

    /// List a category's records sorted ascending by display name.
    ///
    /// Unknown categories yield an empty list.
    pub fn list_by_category(&self, category: &str) -> Vec<&Record> {
        let mut records: Vec<&Record> = self
            .categories
            .get(category)
            .map(|v| v.iter().collect())
            .unwrap_or_default();
        records.sort_by(|a, b| collate::compare(&a.name, &b.name));
        records
    }

    /// Look up a record by category and id.
    pub fn get_by_id(&self, category: &str, id: &str) -> Option<&Record> {
        self.categories
            .get(category)?
            .iter()
            .find(|r| r.id == id)
    }

    /// Look up an attribute by id.
    pub fn attribute(&self, id: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.id == id)
    }
}

impl Default for Archive {
    fn default() -> Self {
        Archive::new()
    }
}


fn parse_dataset(name: &str, json: &str) -> Result<Vec<Record>, String> {
    serde_json::from_str(json).map_err(|e| format!("invalid {} dataset: {}", name, e))
}

fn parse_attributes(json: &str) -> Result<Vec<Attribute>, String> {
    serde_json::from_str(json).map_err(|e| format!("invalid attributes dataset: {}", e))
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
