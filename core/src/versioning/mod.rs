//! Release version document.
//!
//! The version document maps a platform release identifier to the software
//! revisions shipped with it. It is loaded once at startup and shared
//! read-only afterwards.
//!
//! ```yaml
//! default-release: "0.4.0"
//! releases:
//!   "0.4.0":
//!     components:
//!       landing:
//!         version: "0.4.0"
//!         identifiers:
//!           repository: ghcr.io/a3s-lab/landing
//!           tag: "0.4.0"
//!     related:
//!       landing:
//!         - version: "0.3.2"
//!           identifiers:
//!             repository: ghcr.io/a3s-lab/landing
//!             tag: "0.3.2"
//! ```

mod identifier;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{OperatorError, Result};

pub use identifier::{
    Identifier, IdentifierValue, Identifiers, ImageKeys, ImageSource, FROM_POD,
    REPOSITORY_IDENTIFIER, TAG_IDENTIFIER,
};

/// Version document compiled into the binary.
const EMBEDDED_VERSIONS: &str = include_str!("versions.yaml");

/// A specific version of one software component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoftwareRevision {
    pub version: String,
    #[serde(default, skip_serializing_if = "Identifiers::is_empty")]
    pub identifiers: Identifiers,
}

impl SoftwareRevision {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            identifiers: Identifiers::new(),
        }
    }

    /// Builder-style identifier insertion.
    pub fn with_identifier(
        mut self,
        key: impl Into<String>,
        value: impl Into<IdentifierValue>,
    ) -> Self {
        self.identifiers.insert(key, value);
        self
    }

    /// Image source for the given identifier keys.
    pub fn image_source(&self, keys: &ImageKeys) -> Result<ImageSource<'_>> {
        self.identifiers.image_source(keys)
    }
}

/// Revisions bundled in one platform release.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Release {
    /// Default revision per component.
    #[serde(default)]
    pub components: BTreeMap<String, SoftwareRevision>,

    /// Alternate revisions per component, in document order.
    #[serde(default)]
    pub related: BTreeMap<String, Vec<SoftwareRevision>>,
}

impl Release {
    /// Default revision of a component.
    pub fn component(&self, name: &str) -> Option<&SoftwareRevision> {
        self.components.get(name)
    }

    /// Alternate revisions of a component. Empty when none are listed.
    pub fn related_revisions(&self, name: &str) -> &[SoftwareRevision] {
        self.related.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Release identifier → release contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VersionDocument {
    pub default_release: String,
    #[serde(default)]
    pub releases: BTreeMap<String, Release>,
}

impl VersionDocument {
    /// Parse and validate a YAML version document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let document: Self = serde_yaml::from_str(yaml)?;
        document.validate()?;
        Ok(document)
    }

    /// Read a version document from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            OperatorError::ConfigError(format!(
                "Failed to read version document {}: {}",
                path.display(),
                e
            ))
        })?;
        let document = Self::from_yaml_str(&content)?;

        tracing::debug!(
            path = %path.display(),
            releases = document.releases.len(),
            default_release = %document.default_release,
            "Loaded version document"
        );

        Ok(document)
    }

    /// The version document shipped with the operator.
    pub fn embedded() -> Result<Self> {
        Self::from_yaml_str(EMBEDDED_VERSIONS)
    }

    /// Check that the default release exists.
    ///
    /// Revisions whose well-known repository/tag identifiers are unusable
    /// are reported but do not fail validation; resolving them still fails.
    pub fn validate(&self) -> Result<()> {
        if self.default_release.is_empty() {
            return Err(OperatorError::ConfigError(
                "Version document has no default release".to_string(),
            ));
        }
        if !self.releases.contains_key(&self.default_release) {
            return Err(OperatorError::ConfigError(format!(
                "Default release `{}` is not defined in the version document",
                self.default_release
            )));
        }

        let keys = ImageKeys::default();
        for (release_id, release) in &self.releases {
            let related = release
                .related
                .iter()
                .flat_map(|(name, revs)| revs.iter().map(move |rev| (name, rev)));
            for (component, revision) in release.components.iter().chain(related) {
                if let Err(e) = revision.image_source(&keys) {
                    tracing::warn!(
                        release = %release_id,
                        component = %component,
                        version = %revision.version,
                        error = %e,
                        "Revision has unusable image identifiers"
                    );
                }
            }
        }

        Ok(())
    }

    pub fn release(&self, id: &str) -> Option<&Release> {
        self.releases.get(id)
    }
}
