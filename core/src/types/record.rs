use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A generic archive entity keyed by id within a category.
///
/// Only `id` and `name` are modeled; everything else a dataset carries is
/// retained in `fields` so category-specific panels can pick out what they
/// understand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl Record {
    /// Return a string-valued extra field, if present.
    pub fn text_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(|v| v.as_str())
    }
}

/// A character attribute (e.g. Agilidade, Vigor) referenced by skills.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attribute {
    pub id: String,
    pub name: String,
}

/// The set of difficulty targets a skill (or one of its tests) accepts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Difficulty {
    /// Official published DT values, in rulebook order.
    #[serde(default)]
    pub official: Vec<String>,
    /// Whether a GM-chosen ("free") DT is allowed.
    #[serde(default)]
    pub includes_free: bool,
    /// Whether the skill can be used with no DT at all.
    #[serde(default)]
    pub includes_none: bool,
}

impl Difficulty {
    pub fn is_empty(&self) -> bool {
        self.official.is_empty() && !self.includes_free && !self.includes_none
    }
}

/// A named test a skill can be rolled for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillTest {
    pub id: String,
    pub name: String,
    /// Minimum training requirement, if any ("trained", "veteran", "expert").
    #[serde(default)]
    pub training: Option<String>,
    #[serde(default)]
    pub dt: Difficulty,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub load_penalty: bool,
    #[serde(default)]
    pub kit_required: bool,
}

/// The typed view of a record in the `skills` category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Skill {
    pub id: String,
    pub name: String,
    /// Id of the attribute this skill rolls on.
    #[serde(default)]
    pub attribute: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub dt: Difficulty,
    #[serde(default)]
    pub tests: Vec<SkillTest>,
    #[serde(default)]
    pub load_penalty: bool,
    #[serde(default)]
    pub kit_required: bool,
    /// Editorial status; anything other than "ok" means still in progress.
    #[serde(default)]
    pub status: Option<String>,
    /// Source book reference.
    #[serde(default)]
    pub source: Option<String>,
}

impl Skill {
    /// Reinterpret a generic record as a skill. Returns `None` when the
    /// record's extra fields do not fit the skill shape.
    pub fn from_record(record: &Record) -> Option<Skill> {
        let value = serde_json::to_value(record).ok()?;
        serde_json::from_value(value).ok()
    }

    /// Whether the record is flagged as not yet finished.
    pub fn under_construction(&self) -> bool {
        matches!(self.status.as_deref(), Some(s) if s != "ok")
    }
}
