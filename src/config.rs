//! Configuration file reader
//!
//! Reads `depdiff.toml` from the repository root (or an explicit path). Every
//! key is optional; CLI flags override whatever the file sets.

use crate::domain::DependencyBlock;
use crate::error::ConfigError;
use crate::source::ContentSourceKind;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILENAME: &str = "depdiff.toml";

/// Default manifest file name
pub const DEFAULT_MANIFEST: &str = "package.json";

/// Default changelog path
pub const DEFAULT_OUTPUT: &str = "CHANGELOG.md";

/// Field markers used to locate the dependency blocks
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Markers {
    pub dependencies: String,
    pub dev_dependencies: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            dependencies: "\"dependencies".to_string(),
            dev_dependencies: "\"devDependencies\"".to_string(),
        }
    }
}

impl Markers {
    /// Returns the marker for the given block
    pub fn for_block(&self, block: DependencyBlock) -> &str {
        match block {
            DependencyBlock::Dependencies => &self.dependencies,
            DependencyBlock::DevDependencies => &self.dev_dependencies,
        }
    }
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Manifest file name, matched against the last path segment
    pub manifest: String,
    /// Changelog path, relative to the repository root unless absolute
    pub output: PathBuf,
    /// Where manifest content is read from when locating blocks
    pub content_source: ContentSourceKind,
    pub markers: Markers,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest: DEFAULT_MANIFEST.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            content_source: ContentSourceKind::default(),
            markers: Markers::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read configuration from an explicit file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content, path)
    }

    /// Read `depdiff.toml` from `dir` if present, defaults otherwise
    pub fn from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILENAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns true if `file_name` is the tracked manifest
    pub fn is_manifest(&self, file_name: &str) -> bool {
        file_name == self.manifest
    }

    /// Resolve the output path against the repository root
    pub fn output_path(&self, root: &Path) -> PathBuf {
        if self.output.is_absolute() {
            self.output.clone()
        } else {
            root.join(&self.output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.manifest, "package.json");
        assert_eq!(config.output, PathBuf::from("CHANGELOG.md"));
        assert_eq!(config.content_source, ContentSourceKind::Commit);
        assert_eq!(
            config.markers.for_block(DependencyBlock::Dependencies),
            "\"dependencies"
        );
        assert_eq!(
            config.markers.for_block(DependencyBlock::DevDependencies),
            "\"devDependencies\""
        );
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml(
            "output = \"docs/DEPS.md\"\n[markers]\ndev_dependencies = \"\\\"devDeps\\\"\"\n",
            Path::new("depdiff.toml"),
        )
        .unwrap();
        assert_eq!(config.output, PathBuf::from("docs/DEPS.md"));
        assert_eq!(config.manifest, "package.json");
        assert_eq!(config.markers.dependencies, "\"dependencies");
        assert_eq!(config.markers.dev_dependencies, "\"devDeps\"");
    }

    #[test]
    fn test_content_source_value() {
        let config =
            Config::from_toml("content_source = \"workdir\"", Path::new("depdiff.toml")).unwrap();
        assert_eq!(config.content_source, ContentSourceKind::Workdir);
    }

    #[test]
    fn test_invalid_content_source() {
        let err = Config::from_toml("content_source = \"remote\"", Path::new("depdiff.toml"))
            .unwrap_err();
        let msg = format!("{}", err);
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(msg.contains("remote"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Config::from_toml("manifests = \"x\"", Path::new("depdiff.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_from_dir_without_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::from_dir(temp_dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_from_dir_with_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILENAME),
            "manifest = \"composer.json\"\n",
        )
        .unwrap();
        let config = Config::from_dir(temp_dir.path()).unwrap();
        assert!(config.is_manifest("composer.json"));
        assert!(!config.is_manifest("package.json"));
    }

    #[test]
    fn test_output_path() {
        let config = Config::default();
        assert_eq!(
            config.output_path(Path::new("/repo")),
            PathBuf::from("/repo/CHANGELOG.md")
        );
    }
}
