//! Typed embedded identifiers of a software revision.
//!
//! Identifier values are classified once, when the version document is
//! deserialized: a plain string, the `FROM_POD` sentinel, or some other
//! YAML value that cannot be used as a repository or tag.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{OperatorError, Result};

/// Sentinel marking a repository/tag that is inherited from the operator pod.
pub const FROM_POD: &str = "FROM_POD";

/// Well-known identifier key holding the image repository.
pub const REPOSITORY_IDENTIFIER: &str = "repository";

/// Well-known identifier key holding the image tag.
pub const TAG_IDENTIFIER: &str = "tag";

/// A single embedded identifier value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_yaml::Value", into = "serde_yaml::Value")]
pub enum IdentifierValue {
    /// Plain string value.
    Text(String),
    /// The `FROM_POD` sentinel.
    FromPod,
    /// Any non-string value (number, bool, sequence, mapping, null).
    Other(serde_yaml::Value),
}

impl From<serde_yaml::Value> for IdentifierValue {
    fn from(value: serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::String(s) if s == FROM_POD => Self::FromPod,
            serde_yaml::Value::String(s) => Self::Text(s),
            other => Self::Other(other),
        }
    }
}

impl From<IdentifierValue> for serde_yaml::Value {
    fn from(value: IdentifierValue) -> Self {
        match value {
            IdentifierValue::Text(s) => serde_yaml::Value::String(s),
            IdentifierValue::FromPod => serde_yaml::Value::String(FROM_POD.to_string()),
            IdentifierValue::Other(v) => v,
        }
    }
}

impl From<&str> for IdentifierValue {
    fn from(value: &str) -> Self {
        serde_yaml::Value::String(value.to_string()).into()
    }
}

/// A string-typed identifier after lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identifier<'a> {
    Text(&'a str),
    FromPod,
}

/// Embedded identifiers keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifiers(BTreeMap<String, IdentifierValue>);

impl Identifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<IdentifierValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&IdentifierValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &IdentifierValue)> {
        self.0.iter()
    }

    /// Look up a string-typed identifier.
    ///
    /// Returns `Ok(None)` when the key is absent and
    /// [`OperatorError::TypeMismatch`] when it is present but not a string.
    pub fn lookup(&self, key: &str) -> Result<Option<Identifier<'_>>> {
        match self.0.get(key) {
            None => Ok(None),
            Some(IdentifierValue::Text(s)) => Ok(Some(Identifier::Text(s))),
            Some(IdentifierValue::FromPod) => Ok(Some(Identifier::FromPod)),
            Some(IdentifierValue::Other(_)) => Err(OperatorError::TypeMismatch {
                key: key.to_string(),
            }),
        }
    }
}

/// The pair of identifier keys that name a component's repository and tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageKeys {
    pub repository: String,
    pub tag: String,
}

impl ImageKeys {
    pub fn new(repository: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            tag: tag.into(),
        }
    }
}

impl Default for ImageKeys {
    fn default() -> Self {
        Self::new(REPOSITORY_IDENTIFIER, TAG_IDENTIFIER)
    }
}

/// Where a component's image comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource<'a> {
    /// Repository and tag embedded in the revision. Absent values are empty.
    Embedded { repository: &'a str, tag: &'a str },
    /// Both repository and tag are inherited from the operator pod.
    FromPod,
}

impl Identifiers {
    /// Classify the image source for the given repository/tag keys.
    ///
    /// Fails when either value is not a string, or when exactly one of the
    /// two is the `FROM_POD` sentinel.
    pub fn image_source(&self, keys: &ImageKeys) -> Result<ImageSource<'_>> {
        let repository = self.lookup(&keys.repository)?;
        let tag = self.lookup(&keys.tag)?;

        match (repository, tag) {
            (Some(Identifier::FromPod), Some(Identifier::FromPod)) => Ok(ImageSource::FromPod),
            (Some(Identifier::FromPod), _) | (_, Some(Identifier::FromPod)) => {
                Err(OperatorError::InconsistentPodIndirection {
                    repository_key: keys.repository.clone(),
                    tag_key: keys.tag.clone(),
                })
            }
            (repository, tag) => Ok(ImageSource::Embedded {
                repository: text_or_empty(repository),
                tag: text_or_empty(tag),
            }),
        }
    }
}

fn text_or_empty<'a>(identifier: Option<Identifier<'a>>) -> &'a str {
    match identifier {
        Some(Identifier::Text(s)) => s,
        _ => "",
    }
}
