//! Platform instance configuration as supplied by the operator's caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Repository, tag and image overrides for one component.
///
/// Empty strings mean "not overridden".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageOverrides {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub repository: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image: String,
}

impl ImageOverrides {
    pub fn new(
        repository: impl Into<String>,
        tag: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            repository: repository.into(),
            tag: tag.into(),
            image: image.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.repository.is_empty() && self.tag.is_empty() && self.image.is_empty()
    }
}

/// Per-component settings of a platform instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSpec {
    /// Version override selecting one of the release's related revisions.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,

    #[serde(flatten)]
    pub overrides: ImageOverrides,
}

/// Desired state of a platform instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSpec {
    /// Release identifier pin. Empty selects the document's default release.
    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub components: BTreeMap<String, ComponentSpec>,
}

/// A platform instance managed by the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformInstance {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub spec: PlatformSpec,
}

impl PlatformInstance {
    /// Instance pinned to a release identifier.
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            spec: PlatformSpec {
                version: version.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// The pinned release identifier, if any.
    pub fn release_override(&self) -> Option<&str> {
        Some(self.spec.version.as_str()).filter(|v| !v.is_empty())
    }

    /// Settings for a component; unspecified components get defaults.
    pub fn component(&self, name: &str) -> ComponentSpec {
        self.spec.components.get(name).cloned().unwrap_or_default()
    }
}
