//! Build snapshot fixtures
//!
//! Snapshots are built as JSON values so tests exercise the same parsing path
//! as snapshot files written by the builder.

#![allow(dead_code)]

use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use size_report::manifest::BuildSnapshot;

/// Fluent builder for build snapshot JSON
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    packages: Map<String, Value>,
    applications: Map<String, Value>,
    manifests: Map<String, Value>,
}

fn sizes(files: &[(&str, u64)]) -> Value {
    Value::Object(
        files
            .iter()
            .map(|(name, size)| (name.to_string(), json!(size)))
            .collect(),
    )
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package group with its published file sizes
    pub fn package(mut self, name: &str, files: &[(&str, u64)]) -> Self {
        self.packages.insert(name.to_string(), sizes(files));
        self
    }

    /// Add an application group with its page route sizes
    pub fn application(mut self, name: &str, routes: &[(&str, u64)]) -> Self {
        self.applications.insert(name.to_string(), sizes(routes));
        self
    }

    /// Add a publishable package.json under `location`
    pub fn manifest(mut self, location: &str, name: &str, dependencies: &[(&str, &str)]) -> Self {
        let deps: Map<String, Value> = dependencies
            .iter()
            .map(|(dep, range)| (dep.to_string(), json!(range)))
            .collect();
        self.manifests.insert(
            location.to_string(),
            json!({ "name": name, "main": "dist/index.js", "dependencies": deps }),
        );
        self
    }

    /// Add a raw package.json value under `location`
    pub fn raw_manifest(mut self, location: &str, manifest: Value) -> Self {
        self.manifests.insert(location.to_string(), manifest);
        self
    }

    pub fn to_json(&self) -> Value {
        json!({
            "packages": self.packages,
            "applications": self.applications,
            "manifests": self.manifests,
        })
    }

    /// Parse through the same path as snapshot files
    pub fn build(&self) -> BuildSnapshot {
        let snapshot: BuildSnapshot = serde_json::from_value(self.to_json()).unwrap();
        snapshot.validate().unwrap();
        snapshot
    }

    /// Write the snapshot to `dir/file_name`
    pub fn write(&self, dir: &Path, file_name: &str) -> PathBuf {
        let path = dir.join(file_name);
        fs::write(&path, serde_json::to_string_pretty(&self.to_json()).unwrap()).unwrap();
        path
    }
}

/// A temporary workspace holding base and head snapshots
pub struct Workspace {
    pub dir: TempDir,
    pub base: PathBuf,
    pub head: PathBuf,
}

impl Workspace {
    pub fn new(base: &SnapshotBuilder, head: &SnapshotBuilder) -> Self {
        let dir = TempDir::new().unwrap();
        let base = base.write(dir.path(), "base.json");
        let head = head.write(dir.path(), "head.json");
        Self { dir, base, head }
    }

    /// Write `.size-report.toml`
    pub fn with_config(self, contents: &str) -> Self {
        fs::write(self.dir.path().join(".size-report.toml"), contents).unwrap();
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// The UI package on the base branch of most scenarios
pub fn ui_package_base() -> SnapshotBuilder {
    SnapshotBuilder::new()
        .package(
            "@scope/ui",
            &[("/dist/index.js", 1000), ("/dist/index.css", 300), ("/dist/index.js.map", 9000)],
        )
        .manifest("packages/ui", "@scope/ui", &[("clsx", "^2.0.0")])
}

/// The UI package after a 200 byte increase of its entry
pub fn ui_package_head() -> SnapshotBuilder {
    SnapshotBuilder::new()
        .package(
            "@scope/ui",
            &[("/dist/index.js", 1200), ("/dist/index.css", 300), ("/dist/index.js.map", 9400)],
        )
        .manifest("packages/ui", "@scope/ui", &[("clsx", "^2.0.0")])
}
