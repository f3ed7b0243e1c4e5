//! HTTP handlers for the server.
//!
//! There is a single implicit route: every path is accepted and only logged.
//!
//! | Method | Response | Side effect |
//! |--------|----------|-------------|
//! | GET | 200 `true` | none |
//! | POST | 200 `true` | body printed, then a blank line |
//! | other | 501 | none |

mod body;

use std::fmt;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, info, warn};

use super::state::AppState;
use crate::error::SobrError;

/// Entry point for every request.
pub async fn dispatch(State(state): State<Arc<AppState>>, request: Request) -> Response {
    match request.method().clone() {
        Method::GET => get(request),
        Method::POST => post(&state, request).await.into_response(),
        other => not_implemented(&other),
    }
}

/// Handle GET - acknowledge, print nothing.
fn get(request: Request) -> Response {
    info!(
        method = %request.method(),
        path = %request.uri(),
        headers = %HeaderLines(request.headers()),
        "GET request"
    );
    acknowledge()
}

/// Handle POST - log the body and hand it to the printer.
async fn post(state: &AppState, request: Request) -> Result<Response, SobrError> {
    let (parts, body) = request.into_parts();

    let declared = body::content_length(&parts.headers)?;
    let bytes = body::read_exact(body, declared, state.config.body_timeout).await?;
    let text = body::decode(bytes)?;

    info!(
        method = %parts.method,
        path = %parts.uri,
        headers = %HeaderLines(&parts.headers),
        body = %text,
        "POST request"
    );

    // The client's answer does not depend on the printer
    if let Err(e) = state.printer.submit(text).await {
        error!(error = %e, "Could not queue print job");
    }

    Ok(acknowledge())
}

fn not_implemented(method: &Method) -> Response {
    warn!(method = %method, "Unsupported method");
    error_response(
        StatusCode::NOT_IMPLEMENTED,
        &format!("Unsupported method ({})", method),
    )
}

/// 200 with JSON `true`.
fn acknowledge() -> Response {
    (StatusCode::OK, Json(true)).into_response()
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Generate error response JSON.
fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorBody { error: message })).into_response()
}

impl IntoResponse for SobrError {
    fn into_response(self) -> Response {
        let status = match &self {
            SobrError::MalformedRequest(_) | SobrError::InvalidEncoding(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_client_error() {
            warn!(error = %self, "Rejected request");
        } else {
            error!(error = %self, "Request failed");
        }

        error_response(status, &self.to_string())
    }
}

/// Headers as `name: value` pairs on one line, for log fields.
struct HeaderLines<'a>(&'a HeaderMap);

impl fmt::Display for HeaderLines<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match value.to_str() {
                Ok(v) => write!(f, "{}: {}", name, v)?,
                Err(_) => write!(f, "{}: <{} bytes>", name, value.len())?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header};

    #[test]
    fn test_header_lines() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("sobr.co"));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("5"));
        assert_eq!(
            HeaderLines(&headers).to_string(),
            "host: sobr.co, content-length: 5"
        );
    }

    #[test]
    fn test_header_lines_opaque_value() {
        let mut headers = HeaderMap::new();
        headers.insert("x-raw", HeaderValue::from_bytes(&[0xFF, 0xFE]).unwrap());
        assert_eq!(HeaderLines(&headers).to_string(), "x-raw: <2 bytes>");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_post_log_line_carries_request_and_body() {
        use crate::logging::{LevelPrefix, LogSink, capture};
        use crate::printer::{DeviceProfile, Printer, worker};
        use crate::server::ServerConfig;
        use crate::transport::MemoryTransport;

        let printer = Printer::open(Box::new(MemoryTransport::new()), DeviceProfile::POS_5890).unwrap();
        let (handle, worker) = worker::spawn(printer);
        let state = Arc::new(AppState::new(ServerConfig::default(), handle));

        let (subscriber, captured) = capture::subscriber(LevelPrefix::for_sink(LogSink::Journal));
        let guard = tracing::subscriber::set_default(subscriber);

        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/print")
            .header(header::CONTENT_LENGTH, 5)
            .body(axum::body::Body::from("Hello"))
            .unwrap();
        let response = dispatch(State(state), request).await;
        drop(guard);

        assert_eq!(response.status(), StatusCode::OK);
        worker.await.unwrap();

        let line = captured
            .text()
            .lines()
            .find(|line| line.contains("POST request"))
            .map(str::to_string)
            .unwrap();
        assert!(line.starts_with("<6>[INFO] POST request"), "{}", line);
        assert!(line.contains("method=POST"), "{}", line);
        assert!(line.contains("path=/print"), "{}", line);
        assert!(line.contains("content-length: 5"), "{}", line);
        assert!(line.contains("body=Hello"), "{}", line);
    }

    #[test]
    fn test_error_status_codes() {
        let malformed = SobrError::MalformedRequest("x".into()).into_response();
        assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);

        let encoding = SobrError::InvalidEncoding("x".into()).into_response();
        assert_eq!(encoding.status(), StatusCode::BAD_REQUEST);

        let device = SobrError::DeviceUnavailable("x".into()).into_response();
        assert_eq!(device.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
