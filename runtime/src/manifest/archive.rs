//! Manifest archive decoding (tar.gz of YAML files).

use std::io::Read;

use flate2::read::GzDecoder;
use serde::Deserialize;
use serde_json::Value;
use tar::Archive;

use a3s_operator_core::error::{OperatorError, Result};

use super::{Manifest, ARCHIVE_INDEX};

/// Decode all manifest documents from a gzip-compressed tar archive.
///
/// # Errors
///
/// Returns error if:
/// - The data is not gzip-compressed
/// - The tar stream is malformed
///
/// Entries whose YAML cannot be decoded into mappings are logged and
/// skipped.
pub fn decode_manifests(archive: &[u8]) -> Result<Vec<Manifest>> {
    let decoder = GzDecoder::new(archive);
    if decoder.header().is_none() {
        return Err(OperatorError::DecompressError(
            "missing or invalid gzip header".to_string(),
        ));
    }

    let mut archive = Archive::new(decoder);
    let entries = archive
        .entries()
        .map_err(|e| OperatorError::ManifestDecodeError(e.to_string()))?;

    let mut manifests = Vec::new();
    for entry in entries {
        let mut entry = entry.map_err(|e| OperatorError::ManifestDecodeError(e.to_string()))?;
        let name = entry
            .path()
            .map_err(|e| OperatorError::ManifestDecodeError(e.to_string()))?
            .to_string_lossy()
            .into_owned();

        if name == ARCHIVE_INDEX || !name.ends_with(".yaml") {
            continue;
        }

        let mut content = Vec::new();
        entry.read_to_end(&mut content).map_err(|e| {
            OperatorError::ManifestDecodeError(format!("Failed to read entry {}: {}", name, e))
        })?;

        match decode_documents(&content) {
            Ok(documents) => {
                tracing::debug!(entry = %name, documents = documents.len(), "Decoded manifest entry");
                manifests.extend(documents);
            }
            Err(e) => {
                tracing::warn!(entry = %name, error = %e, "Skipping undecodable manifest entry");
            }
        }
    }

    Ok(manifests)
}

/// Decode every YAML document in one archive entry. Empty documents are
/// ignored; any non-mapping document fails the whole entry.
fn decode_documents(content: &[u8]) -> Result<Vec<Manifest>> {
    let mut manifests = Vec::new();

    for document in serde_yaml::Deserializer::from_slice(content) {
        match Value::deserialize(document)? {
            Value::Null => continue,
            Value::Object(object) => manifests.push(Manifest::new(object)),
            other => {
                return Err(OperatorError::ManifestDecodeError(format!(
                    "expected a mapping document, found {}",
                    value_kind(&other)
                )))
            }
        }
    }

    Ok(manifests)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::build_archive;
    use super::*;

    const SERVICE: &[u8] = b"apiVersion: v1
kind: Service
metadata:
  name: landing
";

    const CONFIG_MAPS: &[u8] = b"apiVersion: v1
kind: ConfigMap
metadata:
  name: first
---
apiVersion: v1
kind: ConfigMap
metadata:
  name: second
---
";

    fn names(manifests: &[Manifest]) -> Vec<&str> {
        manifests.iter().filter_map(Manifest::name).collect()
    }

    #[test]
    fn test_decode_yaml_entries() {
        let archive = build_archive(&[("service.yaml", SERVICE)]);
        let manifests = decode_manifests(&archive).unwrap();
        assert_eq!(manifests.len(), 1);
        assert_eq!(manifests[0].kind(), Some("Service"));
    }

    #[test]
    fn test_skips_archive_index() {
        let archive = build_archive(&[
            ("manifest.yaml", b"apiVersion: v1\nkind: Index\n"),
            ("service.yaml", SERVICE),
        ]);
        let manifests = decode_manifests(&archive).unwrap();
        assert_eq!(manifests.len(), 1);
        assert_eq!(manifests[0].kind(), Some("Service"));
    }

    #[test]
    fn test_index_only_matches_exact_name() {
        let archive = build_archive(&[("nested/manifest.yaml", SERVICE)]);
        let manifests = decode_manifests(&archive).unwrap();
        assert_eq!(manifests.len(), 1);
    }

    #[test]
    fn test_skips_non_yaml_entries() {
        let archive = build_archive(&[
            ("README.md", b"# manifests"),
            ("service.yml", SERVICE),
            ("service.yaml.sig", b"signature"),
            ("service.yaml", SERVICE),
        ]);
        let manifests = decode_manifests(&archive).unwrap();
        assert_eq!(manifests.len(), 1);
    }

    #[test]
    fn test_multi_document_entry() {
        let archive = build_archive(&[("config.yaml", CONFIG_MAPS)]);
        let manifests = decode_manifests(&archive).unwrap();
        assert_eq!(names(&manifests), vec!["first", "second"]);
    }

    #[test]
    fn test_preserves_archive_order() {
        let archive = build_archive(&[("b.yaml", CONFIG_MAPS), ("a.yaml", SERVICE)]);
        let manifests = decode_manifests(&archive).unwrap();
        assert_eq!(names(&manifests), vec!["first", "second", "landing"]);
    }

    #[test]
    fn test_invalid_entry_is_dropped() {
        let archive = build_archive(&[
            ("broken.yaml", b"kind: [unterminated\n"),
            ("scalar.yaml", b"just a string\n"),
            ("service.yaml", SERVICE),
        ]);
        let manifests = decode_manifests(&archive).unwrap();
        assert_eq!(names(&manifests), vec!["landing"]);
    }

    #[test]
    fn test_empty_entry_yields_nothing() {
        let archive = build_archive(&[("empty.yaml", b"")]);
        assert!(decode_manifests(&archive).unwrap().is_empty());
    }

    #[test]
    fn test_empty_archive() {
        let archive = build_archive(&[]);
        assert!(decode_manifests(&archive).unwrap().is_empty());
    }

    #[test]
    fn test_not_gzip() {
        let err = decode_manifests(b"plain text").unwrap_err();
        assert!(matches!(err, OperatorError::DecompressError(_)));
    }

    #[test]
    fn test_gzip_but_not_tar() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&[b'x'; 1024]).unwrap();
        let data = encoder.finish().unwrap();

        let err = decode_manifests(&data).unwrap_err();
        assert!(matches!(err, OperatorError::ManifestDecodeError(_)));
    }
}
