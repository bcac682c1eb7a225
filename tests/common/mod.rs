//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! - Build snapshot fixtures written to temporary directories
//! - Assertion helpers for markdown report sections
//!
//! # Usage
//!
//! ```rust,no_run
//! mod common;
//! use common::fixtures::SnapshotBuilder;
//!
//! let snapshot = SnapshotBuilder::new()
//!     .package("@scope/ui", &[("/dist/index.js", 1200)])
//!     .manifest("packages/ui", "@scope/ui", &[("zod", "^3.22.0")])
//!     .build();
//! ```

pub mod assertions;
pub mod fixtures;
