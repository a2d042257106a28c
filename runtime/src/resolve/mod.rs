//! Component revision and image resolution.
//!
//! [`resolve_revision`] picks the software revision of a component from the
//! version document; [`ImageResolver`] turns that revision plus overrides
//! into an image reference. [`ComponentResolver`] chains the two.

mod image;
mod revision;

use std::sync::Arc;

use a3s_operator_core::error::Result;
use a3s_operator_core::platform::{ImageOverrides, PlatformInstance};
use a3s_operator_core::versioning::{ImageKeys, SoftwareRevision, VersionDocument};

use crate::pod::PodImage;

pub use image::ImageResolver;
pub use revision::{effective_release, resolve_revision};

/// Resolves revisions and images of named components against a shared
/// version document.
#[derive(Debug, Clone)]
pub struct ComponentResolver {
    document: Arc<VersionDocument>,
    images: ImageResolver,
}

impl ComponentResolver {
    pub fn new(document: Arc<VersionDocument>, pod_image: PodImage) -> Self {
        Self {
            document,
            images: ImageResolver::new(pod_image),
        }
    }

    pub fn document(&self) -> &VersionDocument {
        &self.document
    }

    /// Software revision of a component. Empty `version_override` selects
    /// the release default.
    pub fn revision(
        &self,
        platform: &PlatformInstance,
        component: &str,
        version_override: &str,
    ) -> Result<&SoftwareRevision> {
        resolve_revision(&self.document, platform, component, version_override)
    }

    /// Image of a component using the well-known `repository`/`tag` keys.
    pub fn image(
        &self,
        platform: &PlatformInstance,
        component: &str,
        version_override: &str,
        overrides: &ImageOverrides,
    ) -> Result<String> {
        self.image_with_keys(
            platform,
            component,
            version_override,
            overrides,
            &ImageKeys::default(),
        )
    }

    /// Image of a component using custom identifier keys.
    pub fn image_with_keys(
        &self,
        platform: &PlatformInstance,
        component: &str,
        version_override: &str,
        overrides: &ImageOverrides,
        keys: &ImageKeys,
    ) -> Result<String> {
        let revision = self.revision(platform, component, version_override)?;
        let image = self.images.resolve(overrides, revision, keys)?;

        tracing::debug!(
            component,
            release = effective_release(&self.document, platform),
            revision = %revision.version,
            image = %image,
            "Resolved component image"
        );

        Ok(image)
    }

    /// Image of a component using the version and overrides configured on
    /// the platform instance itself.
    pub fn platform_image(&self, platform: &PlatformInstance, component: &str) -> Result<String> {
        let spec = platform.component(component);
        self.image(platform, component, &spec.version, &spec.overrides)
    }
}
