//! Artifact naming.
//!
//! Derives the human-readable and filesystem-safe naming strings for
//! packaging, build, and inspection outputs from the resolved
//! project/stage/build-version context. Pure over in-memory structures; the
//! persisted document is never touched.

use crate::bundle::ConfigsBundle;
use crate::options::LoadOptions;

/// Fill in the naming fields of `configs`.
///
/// A caller-supplied `out.file` is left untouched; otherwise the name is
/// derived as `<app_name>_<stage>_<build_version>`. Each of the
/// `package_config`/`build_config`/`inspect_config` sections is populated
/// independently and only when present.
pub fn update_configs(mut configs: ConfigsBundle, options: &LoadOptions) -> ConfigsBundle {
    let app_name = configs.project_config.app_name.clone().unwrap_or_default();
    let build_version = options.build_version.clone().unwrap_or_default();
    let stage = configs.stage.clone();

    if let Some(package) = configs.package_config.as_mut() {
        package.app_name_version = Some(format!("{app_name} - {stage} - {build_version}"));
    }

    if configs.out.file.as_deref().map_or(true, str::is_empty) {
        configs.out.file = Some(format!("{app_name}_{stage}_{build_version}"));
    }
    let out_file = format!(
        "{}/{}",
        configs.out.folder,
        configs.out.file.as_deref().unwrap_or_default()
    );

    if let Some(package) = configs.package_config.as_mut() {
        package.out_file = Some(out_file.clone());
    }
    if let Some(build) = configs.build_config.as_mut() {
        build.out_file = Some(out_file.clone());
    }
    if let Some(inspect) = configs.inspect_config.as_mut() {
        inspect.pkg = Some(out_file);
    }

    configs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::{
        BuildSection, InspectSection, OutSection, PackageSection, ProjectSection,
    };

    fn base_bundle() -> ConfigsBundle {
        ConfigsBundle {
            project_config: ProjectSection {
                app_name: Some("<app_name>".to_string()),
                ..Default::default()
            },
            stage: "<stage>".to_string(),
            ..Default::default()
        }
    }

    fn version_options() -> LoadOptions {
        LoadOptions {
            build_version: Some("<build_version>".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_package_naming_with_derived_file() {
        let mut configs = base_bundle();
        configs.package_config = Some(PackageSection::default());
        configs.out = OutSection {
            file: None,
            folder: "/tmp".to_string(),
        };

        let configs = update_configs(configs, &version_options());

        let package = configs.package_config.unwrap();
        assert_eq!(
            package.app_name_version.as_deref(),
            Some("<app_name> - <stage> - <build_version>")
        );
        assert_eq!(
            configs.out.file.as_deref(),
            Some("<app_name>_<stage>_<build_version>")
        );
        assert_eq!(
            package.out_file.as_deref(),
            Some("/tmp/<app_name>_<stage>_<build_version>")
        );
    }

    #[test]
    fn test_caller_supplied_file_is_kept() {
        let mut configs = base_bundle();
        configs.package_config = Some(PackageSection::default());
        configs.out = OutSection {
            file: Some("file.pkg".to_string()),
            folder: "/home/user".to_string(),
        };

        let configs = update_configs(configs, &version_options());

        let package = configs.package_config.unwrap();
        assert_eq!(
            package.app_name_version.as_deref(),
            Some("<app_name> - <stage> - <build_version>")
        );
        assert_eq!(configs.out.file.as_deref(), Some("file.pkg"));
        assert_eq!(package.out_file.as_deref(), Some("/home/user/file.pkg"));
    }

    #[test]
    fn test_build_section_only() {
        let mut configs = base_bundle();
        configs.build_config = Some(BuildSection::default());
        configs.out = OutSection {
            file: None,
            folder: "/tmp".to_string(),
        };

        let configs = update_configs(configs, &version_options());

        assert_eq!(
            configs.out.file.as_deref(),
            Some("<app_name>_<stage>_<build_version>")
        );
        assert_eq!(
            configs.build_config.unwrap().out_file.as_deref(),
            Some("/tmp/<app_name>_<stage>_<build_version>")
        );
        assert!(configs.package_config.is_none());
    }

    #[test]
    fn test_inspect_section_alongside_package() {
        let mut configs = base_bundle();
        configs.package_config = Some(PackageSection::default());
        configs.inspect_config = Some(InspectSection::default());
        configs.out = OutSection {
            file: None,
            folder: "/tmp".to_string(),
        };

        let configs = update_configs(configs, &version_options());

        let expected = "/tmp/<app_name>_<stage>_<build_version>";
        assert_eq!(
            configs.package_config.unwrap().out_file.as_deref(),
            Some(expected)
        );
        assert_eq!(configs.inspect_config.unwrap().pkg.as_deref(), Some(expected));
    }

    #[test]
    fn test_empty_out_file_is_treated_as_unset() {
        let mut configs = base_bundle();
        configs.out = OutSection {
            file: Some(String::new()),
            folder: "/tmp".to_string(),
        };

        let configs = update_configs(configs, &version_options());
        assert_eq!(
            configs.out.file.as_deref(),
            Some("<app_name>_<stage>_<build_version>")
        );
    }
}
