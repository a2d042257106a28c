//! Manifest archive retrieval.
//!
//! Component manifests are published as a `.tar.gz` archive of YAML files.
//! The archive index `manifest.yaml` is skipped; every other `*.yaml` entry
//! is decoded into one [`Manifest`] per YAML document.

mod archive;
mod download;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use a3s_operator_core::error::Result;

pub use archive::decode_manifests;
pub use download::download_to_bytes;

/// Name of the archive index entry, which is never decoded.
pub const ARCHIVE_INDEX: &str = "manifest.yaml";

/// A structured manifest document (a JSON object).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest(Map<String, Value>);

impl Manifest {
    pub fn new(object: Map<String, Value>) -> Self {
        Self(object)
    }

    pub fn api_version(&self) -> Option<&str> {
        self.0.get("apiVersion").and_then(Value::as_str)
    }

    pub fn kind(&self) -> Option<&str> {
        self.0.get("kind").and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.metadata("name")
    }

    pub fn namespace(&self) -> Option<&str> {
        self.metadata("namespace")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_object(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    fn metadata(&self, field: &str) -> Option<&str> {
        self.0.get("metadata")?.get(field)?.as_str()
    }
}

impl std::fmt::Display for Manifest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}",
            self.kind().unwrap_or("<unknown>"),
            self.name().unwrap_or("<unnamed>")
        )
    }
}

/// Download a manifest archive and decode its documents.
///
/// Download and archive framing failures fail the call; individual entries
/// that cannot be decoded are logged and dropped.
pub async fn fetch_manifests(url: &str) -> Result<Vec<Manifest>> {
    let archive = download_to_bytes(url).await?;
    let manifests = decode_manifests(&archive)?;

    tracing::info!(url, count = manifests.len(), "Fetched manifests");

    Ok(manifests)
}
