//! Software revision lookup.
//!
//! Resolution order:
//! 1. Release: the platform's pinned release, else the document default
//! 2. Revision: the release's default for the component, or, with a version
//!    override, the first related revision whose version matches exactly

use a3s_operator_core::error::{OperatorError, Result};
use a3s_operator_core::platform::PlatformInstance;
use a3s_operator_core::versioning::{SoftwareRevision, VersionDocument};

/// Release identifier in effect for a platform instance.
pub fn effective_release<'a>(
    document: &'a VersionDocument,
    platform: &'a PlatformInstance,
) -> &'a str {
    platform
        .release_override()
        .unwrap_or(document.default_release.as_str())
}

/// Resolve the software revision of a named component.
///
/// `version_override` selects among the release's related revisions and
/// does not affect which release is used. Empty means "release default".
pub fn resolve_revision<'a>(
    document: &'a VersionDocument,
    platform: &PlatformInstance,
    component: &str,
    version_override: &str,
) -> Result<&'a SoftwareRevision> {
    let release_id = effective_release(document, platform);

    let release = document
        .release(release_id)
        .ok_or_else(|| OperatorError::ReleaseNotFound {
            release: release_id.to_string(),
        })?;

    if version_override.is_empty() {
        return release
            .component(component)
            .ok_or_else(|| OperatorError::ComponentNotFound {
                component: component.to_string(),
                release: release_id.to_string(),
            });
    }

    release
        .related_revisions(component)
        .iter()
        .find(|rev| rev.version == version_override)
        .ok_or_else(|| OperatorError::RevisionNotFound {
            component: component.to_string(),
            version: version_override.to_string(),
            release: release_id.to_string(),
        })
}
