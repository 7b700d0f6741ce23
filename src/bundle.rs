//! Derived per-purpose configuration bundle.
//!
//! The loader flattens its device/project/stage selection into this bundle,
//! then the artifact namer fills in the naming fields. The optional sections
//! are independent of each other: which ones exist depends only on what the
//! invoking command asked for.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::Device;

/// Selected project attributes with stage overrides already merged in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectSection {
    /// Human-readable application name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    /// Project source directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,

    /// File patterns included in the packaged artifact.
    #[serde(default)]
    pub files: Vec<String>,

    /// Folder patterns included in the packaged artifact.
    #[serde(default)]
    pub folders: Vec<String>,

    /// Source branch for the selected stage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    /// Stage- or project-specific attributes carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Output location for the produced artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutSection {
    /// Artifact file name; derived by the namer when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Folder the artifact is written to.
    pub folder: String,
}

impl Default for OutSection {
    fn default() -> Self {
        Self {
            file: None,
            folder: default_out_folder(),
        }
    }
}

/// System temp directory without a trailing separator.
pub fn default_out_folder() -> String {
    std::env::temp_dir()
        .to_string_lossy()
        .trim_end_matches('/')
        .to_string()
}

/// Packaging attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageSection {
    /// `"<app_name> - <stage> - <build_version>"`, set by the namer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name_version: Option<String>,

    /// Full output path of the packaged artifact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_file: Option<String>,

    /// Signing-key attributes carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Sideload/build attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildSection {
    /// Full output path of the built artifact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_file: Option<String>,
}

/// Package-inspection attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InspectSection {
    /// Path of the package to inspect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pkg: Option<String>,
}

/// Purpose-keyed configurations derived from a resolved document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigsBundle {
    /// Selected device identifier.
    pub device: String,

    /// Selected device attributes.
    pub device_config: Device,

    /// Selected project identifier.
    pub project: String,

    /// Selected project attributes, stage overrides merged in.
    pub project_config: ProjectSection,

    /// Selected stage identifier.
    pub stage: String,

    /// Artifact output location.
    pub out: OutSection,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_config: Option<PackageSection>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_config: Option<BuildSection>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspect_config: Option<InspectSection>,
}
