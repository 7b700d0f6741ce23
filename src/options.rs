//! Caller-supplied load/edit options.

use std::path::PathBuf;

/// Options consumed by the loader and editor. The surrounding CLI layer fills
/// this in from parsed arguments; defaults mean "use the configured default".
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Path to the configuration document.
    pub config: Option<PathBuf>,

    /// Device identifier; `None` selects the configured default.
    pub device: Option<String>,

    /// Project identifier; `None` selects the configured default.
    pub project: Option<String>,

    /// Stage identifier; `None` selects the project's default stage.
    pub stage: Option<String>,

    /// Whether to run the external validation collaborator.
    pub validate: bool,

    /// Build version used for artifact naming.
    pub build_version: Option<String>,

    /// Output folder override; `None` uses the system temp directory.
    pub out_folder: Option<String>,

    /// Output file override; `None` derives a name from app/stage/version.
    pub out_file: Option<String>,

    /// Carry a `package_config` section in the derived bundle.
    pub package: bool,

    /// Carry a `build_config` section in the derived bundle.
    pub build: bool,

    /// Carry an `inspect_config` section in the derived bundle.
    pub inspect: bool,
}
