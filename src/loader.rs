//! Configuration loading and selection.
//!
//! Orchestrates store existence checks, inheritance resolution, external
//! validation, and device/project/stage selection. Every failure is recovered
//! here and converted into a [`LoadCode`] with empty payloads; nothing raises
//! past this boundary.

use std::env;
use std::path::PathBuf;

use serde_json::Value;

use crate::bundle::{
    default_out_folder, BuildSection, ConfigsBundle, InspectSection, OutSection, PackageSection,
    ProjectSection,
};
use crate::inherit;
use crate::merge::deep_merge;
use crate::naming;
use crate::options::LoadOptions;
use crate::result::{LoadCode, LoadResult};
use crate::schema::{DeviceSet, ProjectSet, SchemaError, StageSet};
use crate::validate::{interpret, ConfigValidator, Verdict};

/// Conventional document name looked for in the current working directory
/// when the configured path does not exist.
pub const DEFAULT_CONFIG_NAME: &str = ".deploy_config.json";

/// Load, validate, and select a configuration.
///
/// Steps short-circuit on first failure: locate the document, resolve its
/// inheritance chain, run the external validator (when `options.validate`),
/// select the effective device/project/stage, and derive the naming bundle.
/// A deprecation-only validation verdict still yields full payloads under
/// [`LoadCode::DepricatedConfig`].
pub fn load_config(options: &LoadOptions, validator: &dyn ConfigValidator) -> LoadResult {
    let Some(path) = locate_document(options) else {
        return LoadResult::failure(LoadCode::MissingConfig);
    };

    let Some(config) = inherit::resolve_document(&path) else {
        return LoadResult::failure(LoadCode::InvalidConfig);
    };

    let mut deprecated = false;
    if options.validate {
        match interpret(&validator.validate(&config, options)) {
            Verdict::Fatal => return LoadResult::failure(LoadCode::InvalidConfig),
            Verdict::Deprecated => {
                tracing::warn!(path = %path.display(), "configuration is deprecated");
                deprecated = true;
            }
            Verdict::Valid => {}
        }
    }

    let devices = match DeviceSet::from_document(&config) {
        Ok(devices) => devices,
        Err(err) => {
            tracing::warn!(%err, "devices section unusable");
            return LoadResult::failure(LoadCode::InvalidConfig);
        }
    };
    let (device_id, device) = match devices.select(options.device.as_deref()) {
        Ok(selection) => selection,
        Err(SchemaError::UnknownId { .. }) => {
            return LoadResult::failure(LoadCode::UnknownDevice)
        }
        Err(err) => {
            tracing::warn!(%err, "device entry unusable");
            return LoadResult::failure(LoadCode::InvalidConfig);
        }
    };

    let Some((project_id, project_config, stage_id)) = select_project(&config, options) else {
        return LoadResult::failure(LoadCode::InvalidConfig);
    };

    let configs = ConfigsBundle {
        device: device_id,
        device_config: device,
        project: project_id,
        project_config,
        stage: stage_id,
        out: OutSection {
            file: options.out_file.clone(),
            folder: options
                .out_folder
                .clone()
                .unwrap_or_else(default_out_folder),
        },
        package_config: options.package.then(PackageSection::default),
        build_config: options.build.then(BuildSection::default),
        inspect_config: options.inspect.then(InspectSection::default),
    };
    let configs = naming::update_configs(configs, options);

    LoadResult {
        code: if deprecated {
            LoadCode::DepricatedConfig
        } else {
            LoadCode::Success
        },
        config: Some(config),
        configs: Some(configs),
    }
}

/// Find the document to load: the configured path when it exists, otherwise
/// the conventional name in the current working directory.
fn locate_document(options: &LoadOptions) -> Option<PathBuf> {
    if let Some(path) = &options.config {
        if path.exists() {
            return Some(path.clone());
        }
    }
    let fallback = env::current_dir().ok()?.join(DEFAULT_CONFIG_NAME);
    fallback.exists().then_some(fallback)
}

/// Select the effective project and stage, merging stage overrides into the
/// project entry. Unknown project/stage identifiers fall back to the
/// configured defaults; only structural problems fail.
fn select_project(config: &Value, options: &LoadOptions) -> Option<(String, ProjectSection, String)> {
    let projects = match ProjectSet::from_document(config) {
        Ok(projects) => projects,
        Err(err) => {
            tracing::warn!(%err, "projects section unusable");
            return None;
        }
    };
    let (project_id, project_value) =
        select_with_fallback(options.project.as_deref(), |id| projects.select(id))?;

    let stages = match StageSet::from_project(&project_value) {
        Ok(stages) => stages,
        Err(err) => {
            tracing::warn!(project = %project_id, %err, "stages section unusable");
            return None;
        }
    };
    let (stage_id, stage_value) =
        select_with_fallback(options.stage.as_deref(), |id| stages.select(id))?;

    // Stage overrides win over project-level attributes.
    let mut project_value = project_value;
    if let Some(map) = project_value.as_object_mut() {
        map.remove("stages");
    }
    let merged = deep_merge(project_value, stage_value);
    let project_config = match serde_json::from_value(merged) {
        Ok(section) => section,
        Err(err) => {
            tracing::warn!(project = %project_id, %err, "project entry unusable");
            return None;
        }
    };

    tracing::debug!(project = %project_id, stage = %stage_id, "selected project and stage");
    Some((project_id, project_config, stage_id))
}

/// Run a selection, retrying with the configured default when the requested
/// identifier is unknown.
fn select_with_fallback<T>(
    requested: Option<&str>,
    select: impl Fn(Option<&str>) -> Result<(String, T), SchemaError>,
) -> Option<(String, T)> {
    match select(requested) {
        Ok(selection) => Some(selection),
        Err(SchemaError::UnknownId { section, id }) => {
            tracing::warn!(section, id = %id, "unknown identifier, using default");
            select(None).ok()
        }
        Err(err) => {
            tracing::warn!(%err, "selection failed");
            None
        }
    }
}
