//! Field editing of persisted documents.
//!
//! An edit expression has the form `field:value` and names exactly one field
//! of a fixed recognized set. The editor reads the document's own literal
//! content (no inheritance resolution), mutates the one target field, and
//! rewrites the whole document pretty-printed; everything else survives
//! verbatim.

use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::options::LoadOptions;
use crate::schema::{DeviceSet, ProjectSet, SchemaError, StageSet};
use crate::store;

/// Field editing errors. No write happens on any error path.
#[derive(Debug, Error)]
pub enum EditError {
    /// Expression was not `field:value`.
    #[error("malformed edit expression `{0}`, expected field:value")]
    MalformedExpression(String),

    /// Field is not in the recognized set.
    #[error("unrecognized field `{0}`")]
    UnknownField(String),

    /// An identifier was supplied for a scope the field does not live in.
    #[error("`{hint}` option conflicts with {scope}-scoped field `{field}`")]
    ConflictingScope {
        field: String,
        scope: &'static str,
        hint: &'static str,
    },

    /// Document missing or malformed; the edit was not applied.
    #[error("could not read document at {}", .0.display())]
    UnreadableDocument(PathBuf),

    /// The resolved target entry is not a mapping.
    #[error("edit target is not a mapping")]
    TargetNotAMapping,

    /// Target device/project/stage could not be resolved.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Rewrite of the document failed.
    #[error("failed to write document: {0}")]
    Write(#[from] io::Error),
}

/// Scope a recognized field lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldScope {
    Device,
    Project,
    Stage,
}

/// Recognized fields per scope. Extensible but closed per deployment.
fn field_scope(field: &str) -> Option<FieldScope> {
    match field {
        "ip" | "user" | "password" => Some(FieldScope::Device),
        "app_name" | "directory" => Some(FieldScope::Project),
        "branch" => Some(FieldScope::Stage),
        _ => None,
    }
}

/// Apply `expression` to the document at `path` and persist it.
///
/// Scope is determined solely by the field name. Identifiers supplied for a
/// different scope are rejected rather than silently ignored; a `project`
/// hint is legitimate for stage-scoped fields since stages nest inside
/// projects. Unspecified identifiers resolve to the configured defaults.
pub fn edit_config(
    path: &Path,
    expression: &str,
    options: &LoadOptions,
) -> Result<(), EditError> {
    let (field, value) = expression
        .split_once(':')
        .filter(|(field, _)| !field.is_empty())
        .ok_or_else(|| EditError::MalformedExpression(expression.to_string()))?;
    let scope = field_scope(field).ok_or_else(|| EditError::UnknownField(field.to_string()))?;
    check_scope_hints(field, scope, options)?;

    let mut doc = store::read_document(path)
        .ok_or_else(|| EditError::UnreadableDocument(path.to_path_buf()))?;
    let target = locate_target(&mut doc, scope, options)?;
    target
        .as_object_mut()
        .ok_or(EditError::TargetNotAMapping)?
        .insert(field.to_string(), Value::String(value.to_string()));

    store::write_document(path, &doc)?;
    tracing::debug!(path = %path.display(), field, "edited configuration field");
    Ok(())
}

/// Reject identifiers that cannot apply to the field's scope.
fn check_scope_hints(
    field: &str,
    scope: FieldScope,
    options: &LoadOptions,
) -> Result<(), EditError> {
    let conflict = |hint: &'static str, scope: &'static str| EditError::ConflictingScope {
        field: field.to_string(),
        scope,
        hint,
    };
    match scope {
        FieldScope::Device => {
            if options.project.is_some() {
                return Err(conflict("project", "device"));
            }
            if options.stage.is_some() {
                return Err(conflict("stage", "device"));
            }
        }
        FieldScope::Project => {
            if options.device.is_some() {
                return Err(conflict("device", "project"));
            }
            if options.stage.is_some() {
                return Err(conflict("stage", "project"));
            }
        }
        FieldScope::Stage => {
            if options.device.is_some() {
                return Err(conflict("device", "stage"));
            }
        }
    }
    Ok(())
}

/// Resolve the mapping the field lives in, within the literal document.
fn locate_target<'a>(
    doc: &'a mut Value,
    scope: FieldScope,
    options: &LoadOptions,
) -> Result<&'a mut Value, EditError> {
    match scope {
        FieldScope::Device => {
            let id = DeviceSet::from_document(doc)?
                .resolve_id(options.device.as_deref())?
                .to_string();
            Ok(&mut doc["devices"][id])
        }
        FieldScope::Project => {
            let id = ProjectSet::from_document(doc)?
                .resolve_id(options.project.as_deref())?
                .to_string();
            Ok(&mut doc["projects"][id])
        }
        FieldScope::Stage => {
            let projects = ProjectSet::from_document(doc)?;
            let (project_id, project) = projects.select(options.project.as_deref())?;
            let stage_id = StageSet::from_project(&project)?
                .resolve_id(options.stage.as_deref())?
                .to_string();
            Ok(&mut doc["projects"][project_id]["stages"][stage_id])
        }
    }
}
