//! Framework-agnostic response descriptor.
//!
//! The hosting HTTP server turns a [`PlaybackResponse`] into its own response
//! type. Headers are final once the descriptor is built; a streamed body can
//! only end early, never change status.

use bytes::Bytes;
use http::header::{self, HeaderMap, HeaderValue};
use http::StatusCode;

use crate::chunks::ChunkStream;
use crate::error::Error;

/// Client-visible body of a 404.
pub const NOT_FOUND_DETAIL: &str = "File not found.";

/// Body of a playback response.
#[derive(Debug)]
pub enum PlaybackBody {
    /// No body at all.
    Empty,
    /// A small in-memory body.
    Full(Bytes),
    /// File content, read lazily in chunks.
    Stream(ChunkStream),
}

/// Status, headers and body of a playback response.
#[derive(Debug)]
pub struct PlaybackResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: PlaybackBody,
}

impl PlaybackResponse {
    /// A response with no headers and no body.
    pub fn empty(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: PlaybackBody::Empty,
        }
    }

    /// 404 with a JSON `detail` body.
    pub fn not_found() -> Self {
        let body = serde_json::json!({ "detail": NOT_FOUND_DETAIL }).to_string();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        Self {
            status: StatusCode::NOT_FOUND,
            headers,
            body: PlaybackBody::Full(Bytes::from(body)),
        }
    }

    /// Map an error to the response the client sees. Nothing from the error
    /// itself reaches the client.
    pub fn from_error(err: &Error) -> Self {
        match err {
            Error::NotFound { .. } => Self::not_found(),
            _ => {
                let status = StatusCode::from_u16(err.http_status())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                Self::empty(status)
            }
        }
    }

    /// Header value as a string, if present and visible ASCII.
    pub fn header(&self, name: impl header::AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl From<Error> for PlaybackResponse {
    fn from(err: Error) -> Self {
        Self::from_error(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_body_is_json_detail() {
        let resp = PlaybackResponse::not_found();
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
        assert_eq!(resp.header(header::CONTENT_TYPE), Some("application/json"));
        match resp.body {
            PlaybackBody::Full(body) => {
                let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
                assert_eq!(value["detail"], "File not found.");
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn range_errors_have_no_headers_or_body() {
        let resp = PlaybackResponse::from(Error::invalid_range("bad"));
        assert_eq!(resp.status, StatusCode::RANGE_NOT_SATISFIABLE);
        assert!(resp.headers.is_empty());
        assert!(matches!(resp.body, PlaybackBody::Empty));

        let resp = PlaybackResponse::from(Error::RangeOutOfBounds { start: 5, size: 5 });
        assert_eq!(resp.status, StatusCode::RANGE_NOT_SATISFIABLE);
    }

    #[test]
    fn not_found_hides_the_path() {
        let resp = PlaybackResponse::from(Error::not_found("file", "/srv/media/secret.mp4"));
        match resp.body {
            PlaybackBody::Full(body) => {
                assert!(!String::from_utf8_lossy(&body).contains("/srv"));
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn io_error_is_500() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        let resp = PlaybackResponse::from(Error::from(io));
        assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
