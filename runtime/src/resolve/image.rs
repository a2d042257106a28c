//! Container image reference resolution.
//!
//! Precedence, lowest to highest:
//! 1. Repository/tag embedded in the software revision
//! 2. Repository/tag overrides
//! 3. Image override
//!
//! When both embedded identifiers are `FROM_POD`, the image comes from the
//! operator pod unless repository and tag are both overridden. The image
//! override still wins in that mode.

use a3s_operator_core::error::{OperatorError, Result};
use a3s_operator_core::platform::ImageOverrides;
use a3s_operator_core::versioning::{ImageKeys, ImageSource, SoftwareRevision};

use crate::pod::PodImage;

/// Computes image references from revisions and overrides.
#[derive(Debug, Clone, Default)]
pub struct ImageResolver {
    pod_image: PodImage,
}

impl ImageResolver {
    pub fn new(pod_image: PodImage) -> Self {
        Self { pod_image }
    }

    pub fn pod_image(&self) -> &PodImage {
        &self.pod_image
    }

    /// Resolve the image for `revision` using the identifiers named by `keys`.
    ///
    /// The result is not validated as an image reference; an embedded
    /// revision without repository or tag yields `":"`-joined empty parts.
    pub fn resolve(
        &self,
        overrides: &ImageOverrides,
        revision: &SoftwareRevision,
        keys: &ImageKeys,
    ) -> Result<String> {
        let image = match revision.image_source(keys)? {
            ImageSource::FromPod => self.pod_indirect(overrides, keys)?,
            ImageSource::Embedded { repository, tag } => {
                let repository = non_empty_or(&overrides.repository, repository);
                let tag = non_empty_or(&overrides.tag, tag);
                format!("{repository}:{tag}")
            }
        };

        if !overrides.image.is_empty() {
            return Ok(overrides.image.clone());
        }

        Ok(image)
    }

    fn pod_indirect(&self, overrides: &ImageOverrides, keys: &ImageKeys) -> Result<String> {
        match (overrides.repository.is_empty(), overrides.tag.is_empty()) {
            (true, true) => self
                .pod_image
                .get()
                .map(str::to_string)
                .ok_or_else(|| OperatorError::PodImageUnavailable {
                    repository_key: keys.repository.clone(),
                    tag_key: keys.tag.clone(),
                }),
            (false, false) => Ok(format!("{}:{}", overrides.repository, overrides.tag)),
            _ => Err(OperatorError::PartialOverride {
                repository: overrides.repository.clone(),
                tag: overrides.tag.clone(),
            }),
        }
    }
}

fn non_empty_or<'a>(preferred: &'a str, fallback: &'a str) -> &'a str {
    if preferred.is_empty() {
        fallback
    } else {
        preferred
    }
}
