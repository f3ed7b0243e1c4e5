//! Reading and decoding POST bodies.

use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, header};

use crate::error::SobrError;

/// Declared body length from the `Content-Length` header.
pub fn content_length(headers: &HeaderMap) -> Result<usize, SobrError> {
    let value = headers.get(header::CONTENT_LENGTH).ok_or_else(|| {
        SobrError::MalformedRequest("missing Content-Length header".to_string())
    })?;

    value
        .to_str()
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .ok_or_else(|| {
            SobrError::MalformedRequest(format!("invalid Content-Length header: {:?}", value))
        })
}

/// Read exactly `declared` bytes of `body`, giving up after `timeout`.
pub async fn read_exact(body: Body, declared: usize, timeout: Duration) -> Result<Bytes, SobrError> {
    let bytes = tokio::time::timeout(timeout, axum::body::to_bytes(body, declared))
        .await
        .map_err(|_| {
            SobrError::MalformedRequest(format!(
                "body not received within {:?} (Content-Length: {})",
                timeout, declared
            ))
        })?
        .map_err(|e| SobrError::MalformedRequest(format!("failed to read body: {}", e)))?;

    if bytes.len() != declared {
        return Err(SobrError::MalformedRequest(format!(
            "body is {} bytes but Content-Length declared {}",
            bytes.len(),
            declared
        )));
    }

    Ok(bytes)
}

/// Decode a body as UTF-8 text.
pub fn decode(bytes: Bytes) -> Result<String, SobrError> {
    String::from_utf8(bytes.to_vec()).map_err(|e| SobrError::InvalidEncoding(e.to_string()))
}
