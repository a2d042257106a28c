//! A3S Operator Core - Foundational Types
//!
//! This module provides the error type, configuration, platform instance
//! model and release version document shared by the A3S Operator crates.

pub mod config;
pub mod error;
pub mod platform;
pub mod versioning;

// Re-export commonly used types
pub use config::{LogLevel, OperatorConfig};
pub use error::{OperatorError, Result};
pub use platform::{ComponentSpec, ImageOverrides, PlatformInstance, PlatformSpec};
pub use versioning::{
    IdentifierValue, Identifiers, ImageKeys, ImageSource, Release, SoftwareRevision,
    VersionDocument,
};

/// A3S Operator version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
