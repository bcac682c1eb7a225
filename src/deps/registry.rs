//! Package size lookups against the npm registry

use log::{debug, warn};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use thiserror::Error;

use super::resolver::SizeLookup;
use crate::infra::{CommandExecutor, RealCommandExecutor};

/// Why a single registry lookup produced no size
#[derive(Debug, Error)]
pub enum LookupError {
    /// npm could not be started
    #[error("failed to run npm: {0}")]
    Spawn(#[from] std::io::Error),

    /// npm reported a problem on stderr or exited non-zero
    #[error("npm view failed: {0}")]
    Npm(String),

    /// Output was not the expected JSON document
    #[error("unexpected npm view output: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Size lookups through `npm view <name>@<version> --json`
pub struct NpmRegistry<CE: CommandExecutor = RealCommandExecutor> {
    cmd_executor: CE,
}

impl NpmRegistry<RealCommandExecutor> {
    /// Create a registry client using the `npm` on `PATH`
    pub fn new() -> Self {
        Self {
            cmd_executor: RealCommandExecutor,
        }
    }
}

impl Default for NpmRegistry<RealCommandExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<CE: CommandExecutor> NpmRegistry<CE> {
    /// Create a registry client with a custom command executor (for testing)
    pub fn with_executor(cmd_executor: CE) -> Self {
        Self { cmd_executor }
    }

    /// Query `dist.unpackedSize` for one exact version
    ///
    /// A missing `unpackedSize` field counts as 0, as npm omits it for
    /// very old packages.
    pub fn query(&self, package: &str, version: &str) -> Result<u64, LookupError> {
        let spec = format!("{}@{}", package, version);
        let output = self
            .cmd_executor
            .execute(|cmd| cmd.args(["view", spec.as_str(), "--json"]), "npm")?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() || !stderr.trim().is_empty() {
            return Err(LookupError::Npm(stderr.trim().to_string()));
        }

        let document: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        // Ranges matching several versions come back as an array
        let info = match &document {
            serde_json::Value::Array(versions) => versions.last().unwrap_or(&document),
            _ => &document,
        };

        Ok(info
            .pointer("/dist/unpackedSize")
            .and_then(serde_json::Value::as_u64)
            .unwrap_or(0))
    }
}

impl<CE: CommandExecutor + Sync> SizeLookup for NpmRegistry<CE> {
    fn unpacked_size(&self, package: &str, version: &str) -> u64 {
        match self.query(package, version) {
            Ok(size) => {
                debug!("{}@{} unpacked size: {} B", package, version, size);
                size
            }
            Err(e) => {
                warn!("Size lookup for {}@{} failed, using 0: {}", package, version, e);
                0
            }
        }
    }
}

/// Memoizes another lookup per (name, version)
///
/// Concurrent misses on the same pair wait for a single inner lookup.
pub struct CachedLookup<L: SizeLookup> {
    inner: L,
    cache: Mutex<HashMap<(String, String), Arc<OnceLock<u64>>>>,
}

impl<L: SizeLookup> CachedLookup<L> {
    /// Wrap `inner` with an empty cache
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Number of distinct (name, version) pairs requested so far
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Whether nothing has been looked up yet
    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }
}

impl<L: SizeLookup> SizeLookup for CachedLookup<L> {
    fn unpacked_size(&self, package: &str, version: &str) -> u64 {
        let entry = Arc::clone(
            self.cache
                .lock()
                .entry((package.to_string(), version.to_string()))
                .or_default(),
        );

        // The map lock is released here; only callers of this pair wait
        *entry.get_or_init(|| self.inner.unpacked_size(package, version))
    }
}

/// Lookup that never touches the network and reports every size as 0
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineLookup;

impl SizeLookup for OfflineLookup {
    fn unpacked_size(&self, _package: &str, _version: &str) -> u64 {
        0
    }
}
