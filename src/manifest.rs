//! Build snapshots and package manifests handed over by the external builder
//!
//! One [`BuildSnapshot`] is produced per branch. Its manifests are full
//! `package.json` documents; they are validated here, at the boundary, so the
//! diff and dependency stages can rely on every group having a name.

use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::diff::GroupedSnapshots;
use crate::infra::{FileSystem, RealFileSystem};

/// Dependency name to declared version range
pub type DependencyManifest = IndexMap<String, String>;

/// Errors raised while loading or validating build snapshots
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Snapshot file could not be read
    #[error("Failed to read build snapshot {path}")]
    Read {
        /// Snapshot path
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Snapshot file is not valid JSON of the expected shape
    #[error("Failed to parse build snapshot {path}")]
    Parse {
        /// Snapshot path
        path: PathBuf,
        #[source]
        /// JSON error source
        source: serde_json::Error,
    },

    /// A manifest has no `name` field
    #[error("package.json is missing the 'name' field (group: {location})")]
    MissingName {
        /// Group key or path the manifest was recorded under
        location: String,
    },
}

/// The subset of `package.json` the report needs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    /// Package name, required
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Runtime dependencies
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub dependencies: DependencyManifest,

    /// Development dependencies
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub dev_dependencies: DependencyManifest,

    /// Published file globs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,

    /// Entry point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,

    /// Publish settings, kept opaque
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_config: Option<serde_json::Value>,
}

impl PackageManifest {
    /// Name of the package, or an error naming where the manifest came from
    pub fn require_name(&self, location: &str) -> Result<&str, ManifestError> {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ManifestError::MissingName {
                location: location.to_string(),
            })
    }

    /// Whether the manifest describes a publishable npm package
    ///
    /// # Examples
    ///
    /// ```
    /// use size_report::manifest::PackageManifest;
    ///
    /// let mut manifest = PackageManifest::default();
    /// assert!(!manifest.is_publishable());
    ///
    /// manifest.main = Some("dist/index.js".to_string());
    /// assert!(manifest.is_publishable());
    /// ```
    pub fn is_publishable(&self) -> bool {
        !self.files.is_empty() || self.main.is_some() || self.publish_config.is_some()
    }
}

/// Everything the external builder measured for one branch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildSnapshot {
    /// Package name to file sizes of its published files
    #[serde(default)]
    pub packages: GroupedSnapshots,

    /// Application name to page route sizes
    #[serde(default)]
    pub applications: GroupedSnapshots,

    /// Group key to that group's `package.json`
    #[serde(default)]
    pub manifests: IndexMap<String, PackageManifest>,
}

impl BuildSnapshot {
    /// Load and validate a snapshot file
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        Self::load_with_fs(path, &RealFileSystem)
    }

    /// Load and validate a snapshot file with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(path: &Path, fs: &FS) -> Result<Self, ManifestError> {
        let contents = fs.read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let snapshot: BuildSnapshot =
            serde_json::from_str(&contents).map_err(|source| ManifestError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        snapshot.validate()?;
        debug!(
            "Loaded {}: {} packages, {} applications, {} manifests",
            path.display(),
            snapshot.packages.len(),
            snapshot.applications.len(),
            snapshot.manifests.len()
        );

        Ok(snapshot)
    }

    /// Check that every manifest carries a name
    pub fn validate(&self) -> Result<(), ManifestError> {
        for (location, manifest) in &self.manifests {
            let name = manifest.require_name(location)?;
            if self.packages.contains_key(name) && !manifest.is_publishable() {
                warn!(
                    "{} has package sizes but its manifest declares no files, main or publishConfig",
                    name
                );
            }
        }
        Ok(())
    }

    /// Runtime dependencies of every package, keyed by package name
    ///
    /// Manifests of application groups are left out. Manifests without a
    /// name are skipped; [`BuildSnapshot::validate`] rejects them before this
    /// is reached.
    pub fn dependency_manifests(&self) -> IndexMap<String, DependencyManifest> {
        self.manifests
            .values()
            .filter_map(|manifest| {
                let name = manifest.name.as_deref()?;
                if self.applications.contains_key(name) {
                    return None;
                }
                Some((name.to_string(), manifest.dependencies.clone()))
            })
            .collect()
    }
}
