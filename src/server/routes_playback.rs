//! Video playback routes.
//!
//! Routes:
//! - `GET /api/v1/video/playback/{file_name}/` - stream a video, honoring `Range`

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap},
    response::Response,
    routing::get,
    Router,
};
use lexicon_playback::{PlaybackBody, PlaybackResponse};

use super::AppContext;

pub fn playback_routes() -> Router<AppContext> {
    Router::new()
        .route("/api/v1/video/playback/:file_name/", get(playback))
        .route("/api/v1/video/playback/:file_name", get(playback))
}

/// Stream a video file, whole or by byte range.
pub async fn playback(
    State(ctx): State<AppContext>,
    Path(file_name): Path<String>,
    headers: HeaderMap,
) -> Response {
    // A Range header that is not visible ASCII is still a Range header, and
    // parsing "" fails, so it is answered with 416.
    let range = headers
        .get(header::RANGE)
        .map(|v| v.to_str().unwrap_or_default());

    into_response(ctx.streamer.handle(&file_name, range).await)
}

/// Convert the playback descriptor into an axum response.
///
/// Streamed bodies go through `Body::from_stream`; a read error after the
/// headers are sent aborts the connection, leaving the body shorter than
/// `Content-Length`.
pub fn into_response(playback: PlaybackResponse) -> Response {
    let body = match playback.body {
        PlaybackBody::Empty => Body::empty(),
        PlaybackBody::Full(bytes) => Body::from(bytes),
        PlaybackBody::Stream(stream) => Body::from_stream(stream),
    };

    let mut response = Response::new(body);
    *response.status_mut() = playback.status;
    *response.headers_mut() = playback.headers;
    response
}
