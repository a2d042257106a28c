use thiserror::Error;

/// A3S Operator error types
#[derive(Error, Debug)]
pub enum OperatorError {
    /// Release identifier missing from the version document
    #[error("Data related to the release identifier `{release}` cannot be found")]
    ReleaseNotFound { release: String },

    /// Component has no default revision in the release
    #[error(
        "Data related to the software component `{component}` within release identifier `{release}` cannot be found"
    )]
    ComponentNotFound { component: String, release: String },

    /// No related revision of the component matches the requested version
    #[error(
        "Data related to the software component `{component}` and version `{version}` within release identifier `{release}` cannot be found"
    )]
    RevisionNotFound {
        component: String,
        version: String,
        release: String,
    },

    /// Embedded identifier is present but not a string
    #[error("The embedded identifier `{key}` was expected to be a string")]
    TypeMismatch { key: String },

    /// Only one of repository/tag is taken from the operator pod
    #[error(
        "Both repository (`{repository_key}`) and tag (`{tag_key}`) must be taken from the pod definition together"
    )]
    InconsistentPodIndirection {
        repository_key: String,
        tag_key: String,
    },

    /// Pod-indirect component given only one of repository/tag override
    #[error(
        "This component requires both a repository and tag override. Only one was provided (repository: `{repository}`, tag: `{tag}`)"
    )]
    PartialOverride { repository: String, tag: String },

    /// Pod-indirect component but the operator image is unknown
    #[error(
        "This component cannot take its container image (`{repository_key}`/`{tag_key}`) from the operator pod because the operator container image was not found"
    )]
    PodImageUnavailable {
        repository_key: String,
        tag_key: String,
    },

    /// Manifest archive download failed
    #[error("Could not download file: {url} -> {status_code}: {message}")]
    DownloadError {
        url: String,
        status_code: u16,
        message: String,
    },

    /// Manifest archive is not valid gzip
    #[error("Could not read manifest gzip: {0}")]
    DecompressError(String),

    /// Manifest archive tar stream is malformed
    #[error("Could not read manifest tar: {0}")]
    ManifestDecodeError(String),

    /// Template parse or render failure
    #[error("Template error: {0}")]
    TemplateError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl OperatorError {
    /// True for the three revision store lookup failures.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ReleaseNotFound { .. }
                | Self::ComponentNotFound { .. }
                | Self::RevisionNotFound { .. }
        )
    }

    /// True for errors caused by version data or caller input rather than
    /// I/O. These never succeed on retry.
    pub fn is_configuration_error(&self) -> bool {
        self.is_not_found()
            || matches!(
                self,
                Self::TypeMismatch { .. }
                    | Self::InconsistentPodIndirection { .. }
                    | Self::PartialOverride { .. }
                    | Self::PodImageUnavailable { .. }
                    | Self::ConfigError(_)
            )
    }
}

impl From<serde_json::Error> for OperatorError {
    fn from(err: serde_json::Error) -> Self {
        OperatorError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for OperatorError {
    fn from(err: serde_yaml::Error) -> Self {
        OperatorError::SerializationError(err.to_string())
    }
}

/// Result type alias for A3S Operator operations
pub type Result<T> = std::result::Result<T, OperatorError>;
