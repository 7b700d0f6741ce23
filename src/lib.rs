//! Deploy-lane configuration core.
//!
//! This crate implements the configuration subsystem of the device deploy
//! lane: JSON documents describing devices, projects, build stages, and
//! credentials, with recursive inheritance, validation dispatch, effective
//! device/project/stage selection, single-field editing, and artifact-name
//! derivation. Device communication, packaging, and CLI parsing live in the
//! surrounding tool.

pub mod bundle;
pub mod editor;
pub mod inherit;
pub mod loader;
pub mod merge;
pub mod naming;
pub mod options;
pub mod result;
pub mod schema;
pub mod store;
pub mod validate;

pub use bundle::{
    BuildSection, ConfigsBundle, InspectSection, OutSection, PackageSection, ProjectSection,
};
pub use editor::{edit_config, EditError};
pub use inherit::{resolve_document, MAX_PARENT_DEPTH};
pub use loader::{load_config, DEFAULT_CONFIG_NAME};
pub use merge::deep_merge;
pub use naming::update_configs;
pub use options::LoadOptions;
pub use result::{LoadCode, LoadResult};
pub use schema::{Device, DeviceSet, ProjectSet, SchemaError, StageSet};
pub use validate::{ConfigValidator, Verdict};
