//! Container image of the running operator pod.
//!
//! Captured once at startup and handed to resolvers by value. Components
//! whose identifiers are `FROM_POD` inherit this image.

use a3s_operator_core::config::{OperatorConfig, POD_IMAGE_ENV};

/// The operator pod's own container image. Empty means unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PodImage(Option<String>);

impl PodImage {
    pub fn new(image: impl Into<String>) -> Self {
        let image = image.into();
        Self(Some(image).filter(|i| !i.is_empty()))
    }

    pub fn unavailable() -> Self {
        Self(None)
    }

    /// Read the image from `A3S_OPERATOR_IMAGE`.
    pub fn from_env() -> Self {
        std::env::var(POD_IMAGE_ENV)
            .map(Self::new)
            .unwrap_or_default()
    }

    /// Image from configuration, with the environment as fallback.
    pub fn from_config(config: &OperatorConfig) -> Self {
        match &config.pod_image {
            Some(image) if !image.is_empty() => Self::new(image.clone()),
            _ => Self::from_env(),
        }
    }

    pub fn get(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_available(&self) -> bool {
        self.0.is_some()
    }
}

impl From<Option<String>> for PodImage {
    fn from(image: Option<String>) -> Self {
        image.map(Self::new).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let pod = PodImage::new("registry/x:latest");
        assert_eq!(pod.get(), Some("registry/x:latest"));
        assert!(pod.is_available());
    }

    #[test]
    fn test_empty_is_unavailable() {
        assert!(!PodImage::new("").is_available());
        assert_eq!(PodImage::new(""), PodImage::unavailable());
        assert_eq!(PodImage::from(None), PodImage::unavailable());
    }

    #[test]
    fn test_from_config_prefers_explicit_image() {
        let config = OperatorConfig {
            pod_image: Some("quay.io/a3s/operator:0.4.0".to_string()),
            ..Default::default()
        };
        assert_eq!(
            PodImage::from_config(&config).get(),
            Some("quay.io/a3s/operator:0.4.0")
        );
    }
}
