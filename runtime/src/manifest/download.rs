//! HTTP download of manifest archives.

use a3s_operator_core::error::{OperatorError, Result};

/// Download a URL into memory.
///
/// Transport failures are reported with status code 0; non-success HTTP
/// responses carry their status code.
pub async fn download_to_bytes(url: &str) -> Result<Vec<u8>> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| OperatorError::DownloadError {
            url: url.to_string(),
            status_code: 0,
            message: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(OperatorError::DownloadError {
            url: url.to_string(),
            status_code: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("Download failed")
                .to_string(),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| OperatorError::DownloadError {
            url: url.to_string(),
            status_code: status.as_u16(),
            message: e.to_string(),
        })?;

    tracing::debug!(url, size = bytes.len(), "Downloaded manifest archive");

    Ok(bytes.to_vec())
}
