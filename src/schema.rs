//! Typed views over document sections.
//!
//! Documents keep their `devices`/`projects`/`stages` sections as JSON
//! mappings with a reserved `"default"` key naming the default entry. These
//! wrappers replace ad-hoc key lookups with accessors that fail closed on
//! unknown identifiers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Schema errors raised by the typed section views.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    /// The document has no section with this name.
    #[error("document has no `{0}` section")]
    MissingSection(&'static str),

    /// The section exists but is not a mapping.
    #[error("`{0}` section is not a mapping")]
    NotAMapping(&'static str),

    /// The section has no `default` entry naming an identifier.
    #[error("`{0}` section has no default entry")]
    MissingDefault(&'static str),

    /// The `default` entry names an identifier with no matching entry.
    #[error("`{section}` default `{id}` names no entry")]
    DanglingDefault { section: &'static str, id: String },

    /// A caller-supplied identifier is not present in the section.
    #[error("unknown {section} `{id}`")]
    UnknownId { section: &'static str, id: String },

    /// An entry exists but cannot be read as its expected shape.
    #[error("malformed {section} entry `{id}`: {reason}")]
    MalformedEntry {
        section: &'static str,
        id: String,
        reason: String,
    },
}

/// A device's connection attributes.
///
/// Absent attributes deserialize to empty strings; whether they must be
/// present is the external validator's concern, not selection's.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Device {
    /// Device address on the local network.
    pub ip: String,
    /// Development-mode username.
    pub user: String,
    /// Development-mode password.
    pub password: String,
    /// Deployment-specific attributes carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A section mapping with a reserved `default` identifier.
///
/// Entries stay as raw JSON values; typed extraction happens at selection
/// time so a malformed entry only fails when actually chosen.
#[derive(Debug, Clone)]
pub struct EntrySet {
    section: &'static str,
    entries: Map<String, Value>,
    default_id: String,
}

impl EntrySet {
    /// Build a set from `value`, which must be the section's mapping.
    pub fn from_value(value: &Value, section: &'static str) -> Result<Self, SchemaError> {
        let map = value
            .as_object()
            .ok_or(SchemaError::NotAMapping(section))?;
        let default_id = map
            .get("default")
            .and_then(Value::as_str)
            .ok_or(SchemaError::MissingDefault(section))?
            .to_string();
        let entries: Map<String, Value> = map
            .iter()
            .filter(|(key, _)| key.as_str() != "default")
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        if !entries.contains_key(&default_id) {
            return Err(SchemaError::DanglingDefault {
                section,
                id: default_id,
            });
        }
        Ok(Self {
            section,
            entries,
            default_id,
        })
    }

    /// Build a set from the named top-level section of `doc`.
    pub fn from_document(doc: &Value, section: &'static str) -> Result<Self, SchemaError> {
        let value = doc
            .get(section)
            .ok_or(SchemaError::MissingSection(section))?;
        Self::from_value(value, section)
    }

    /// Identifier of the default entry.
    pub fn default_id(&self) -> &str {
        &self.default_id
    }

    /// Resolve `requested` to a known identifier, falling back to the default
    /// when unspecified. Unknown identifiers fail closed.
    pub fn resolve_id<'a>(&'a self, requested: Option<&'a str>) -> Result<&'a str, SchemaError> {
        match requested {
            None => Ok(&self.default_id),
            Some(id) if self.entries.contains_key(id) => Ok(id),
            Some(id) => Err(SchemaError::UnknownId {
                section: self.section,
                id: id.to_string(),
            }),
        }
    }

    /// Resolve an identifier and return it with its raw entry.
    pub fn entry<'a>(
        &'a self,
        requested: Option<&'a str>,
    ) -> Result<(&'a str, &'a Value), SchemaError> {
        let id = self.resolve_id(requested)?;
        let value = self.entries.get(id).ok_or(SchemaError::UnknownId {
            section: self.section,
            id: id.to_string(),
        })?;
        Ok((id, value))
    }
}

/// The document's `devices` section.
#[derive(Debug, Clone)]
pub struct DeviceSet(EntrySet);

impl DeviceSet {
    pub fn from_document(doc: &Value) -> Result<Self, SchemaError> {
        EntrySet::from_document(doc, "devices").map(Self)
    }

    pub fn resolve_id<'a>(&'a self, requested: Option<&'a str>) -> Result<&'a str, SchemaError> {
        self.0.resolve_id(requested)
    }

    /// Select a device by identifier (or the default) as a typed record.
    pub fn select(&self, requested: Option<&str>) -> Result<(String, Device), SchemaError> {
        let (id, value) = self.0.entry(requested)?;
        let device =
            serde_json::from_value(value.clone()).map_err(|e| SchemaError::MalformedEntry {
                section: "devices",
                id: id.to_string(),
                reason: e.to_string(),
            })?;
        Ok((id.to_string(), device))
    }
}

/// The document's `projects` section.
#[derive(Debug, Clone)]
pub struct ProjectSet(EntrySet);

impl ProjectSet {
    pub fn from_document(doc: &Value) -> Result<Self, SchemaError> {
        EntrySet::from_document(doc, "projects").map(Self)
    }

    pub fn default_id(&self) -> &str {
        self.0.default_id()
    }

    pub fn resolve_id<'a>(&'a self, requested: Option<&'a str>) -> Result<&'a str, SchemaError> {
        self.0.resolve_id(requested)
    }

    /// Select a project entry by identifier (or the default).
    pub fn select(&self, requested: Option<&str>) -> Result<(String, Value), SchemaError> {
        let (id, value) = self.0.entry(requested)?;
        Ok((id.to_string(), value.clone()))
    }
}

/// A project's `stages` mapping.
#[derive(Debug, Clone)]
pub struct StageSet(EntrySet);

impl StageSet {
    pub fn from_project(project: &Value) -> Result<Self, SchemaError> {
        let value = project
            .get("stages")
            .ok_or(SchemaError::MissingSection("stages"))?;
        EntrySet::from_value(value, "stages").map(Self)
    }

    pub fn default_id(&self) -> &str {
        self.0.default_id()
    }

    pub fn resolve_id<'a>(&'a self, requested: Option<&'a str>) -> Result<&'a str, SchemaError> {
        self.0.resolve_id(requested)
    }

    /// Select a stage entry by identifier (or the project's default).
    pub fn select(&self, requested: Option<&str>) -> Result<(String, Value), SchemaError> {
        let (id, value) = self.0.entry(requested)?;
        Ok((id.to_string(), value.clone()))
    }
}
