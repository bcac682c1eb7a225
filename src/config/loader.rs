//! Configuration file loading

use super::file::{ConfigFile, CONFIG_FILE_NAME};
use crate::error::SizeReportError;
use crate::infra::{FileSystem, RealFileSystem};
use anyhow::{Context, Result};
use log::debug;
use std::path::Path;

/// Handles loading configuration files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from .size-report.toml in the given directory
    ///
    /// A missing file yields the defaults.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use size_report::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("."))?;
    /// println!("Report language: {}", config.language);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(project_root: &Path) -> Result<ConfigFile> {
        Self::load_with_fs(project_root, &RealFileSystem)
    }

    /// Load config with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(project_root: &Path, fs: &FS) -> Result<ConfigFile> {
        let config_path = project_root.join(CONFIG_FILE_NAME);

        let contents = match fs.read_to_string(&config_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No {} found, using defaults", config_path.display());
                return Ok(ConfigFile::default());
            }
            Err(e) => {
                return Err(e).context("Failed to read .size-report.toml");
            }
        };

        let config: ConfigFile = toml_edit::de::from_str(&contents)
            .map_err(|e| SizeReportError::InvalidConfig {
                path: config_path.clone(),
                message: e.to_string().trim().to_string(),
            })
            .context("Failed to parse .size-report.toml")?;

        debug!("Loaded {}", config_path.display());
        Ok(config)
    }

    /// Check if config file exists in project
    pub fn exists(project_root: &Path) -> bool {
        project_root.join(CONFIG_FILE_NAME).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    struct MockFileSystem {
        file_content: Option<String>,
        should_fail_read: bool,
    }

    impl MockFileSystem {
        fn new() -> Self {
            Self {
                file_content: None,
                should_fail_read: false,
            }
        }

        fn with_content(content: &str) -> Self {
            Self {
                file_content: Some(content.to_string()),
                should_fail_read: false,
            }
        }

        fn with_read_error() -> Self {
            Self {
                file_content: None,
                should_fail_read: true,
            }
        }
    }

    impl FileSystem for MockFileSystem {
        fn read_to_string(&self, _path: &Path) -> io::Result<String> {
            if self.should_fail_read {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "Mock read error",
                ));
            }
            self.file_content
                .clone()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "File not found"))
        }

        fn write(&self, _path: &Path, _contents: impl AsRef<[u8]>) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let fs = MockFileSystem::new();
        let config = ConfigLoader::load_with_fs(Path::new("/test"), &fs).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_load_valid_config() {
        let fs = MockFileSystem::with_content("language = \"ko\"\nminimum-change-threshold = 50\n");
        let config = ConfigLoader::load_with_fs(Path::new("/test"), &fs).unwrap();
        assert_eq!(config.language, "ko");
        assert_eq!(config.minimum_change_threshold, Some(50));
    }

    #[test]
    fn test_load_read_error_is_propagated() {
        let fs = MockFileSystem::with_read_error();
        let err = ConfigLoader::load_with_fs(Path::new("/test"), &fs).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_load_invalid_toml_is_invalid_config() {
        let fs = MockFileSystem::with_content("show-total = \"maybe\"");
        let err = ConfigLoader::load_with_fs(Path::new("/test"), &fs).unwrap_err();

        let config_err = err
            .downcast_ref::<SizeReportError>()
            .expect("should carry SizeReportError");
        assert!(matches!(
            config_err,
            SizeReportError::InvalidConfig { path, .. } if *path == PathBuf::from("/test/.size-report.toml")
        ));
        assert_eq!(config_err.exit_code(), 78);
    }

    #[test]
    fn test_exists_checks_project_root() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(!ConfigLoader::exists(dir.path()));
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "").unwrap();
        assert!(ConfigLoader::exists(dir.path()));
    }
}
