//! A3S Operator Runtime - component resolution and manifest handling.
//!
//! This module provides the runtime pieces of the A3S Operator: resolving
//! the software revision and container image of platform components,
//! fetching manifest archives, and rendering orchestration templates.

pub mod manifest;
pub mod pod;
pub mod resolve;
pub mod template;

// Re-export common types
pub use manifest::{decode_manifests, download_to_bytes, fetch_manifests, Manifest};
pub use pod::PodImage;
pub use resolve::{resolve_revision, ComponentResolver, ImageResolver};
pub use template::{render_str, render_template, TemplateContext};

/// A3S Operator Runtime version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
