//! The playback request handler.

use std::path::Path;
use std::sync::Arc;

use http::header::{self, HeaderMap, HeaderValue};
use http::StatusCode;

use crate::catalog::{Resolver, DEFAULT_CONTENT_TYPE};
use crate::chunks::ChunkStream;
use crate::error::{Error, Result};
use crate::range::{ByteRange, RangeRequest};
use crate::response::{PlaybackBody, PlaybackResponse};
use crate::storage::{LocalStorage, SeekableRead, Storage};

/// A resolved record together with the size of its file.
#[derive(Debug, Clone)]
struct MediaResource<'a> {
    path: &'a Path,
    size: u64,
    content_type: HeaderValue,
}

/// Serves media files with HTTP range request support.
///
/// Holds no per-request state; one instance is shared by every request.
#[derive(Clone)]
pub struct RangeStreamer {
    resolver: Arc<dyn Resolver>,
    storage: Arc<dyn Storage>,
}

impl RangeStreamer {
    pub fn new(resolver: Arc<dyn Resolver>, storage: Arc<dyn Storage>) -> Self {
        Self { resolver, storage }
    }

    /// Streamer over the local filesystem.
    pub fn local(resolver: Arc<dyn Resolver>) -> Self {
        Self::new(resolver, Arc::new(LocalStorage::new()))
    }

    /// Answer a playback request.
    ///
    /// Without `range_header` the whole file is served with 200. With one, the
    /// requested slice is served with 206, or 416 when the header cannot be
    /// parsed or starts past the end of the file. Unknown identifiers and
    /// missing files get 404.
    #[tracing::instrument(skip(self))]
    pub async fn handle(
        &self,
        resource_id: &str,
        range_header: Option<&str>,
    ) -> PlaybackResponse {
        match self.try_handle(resource_id, range_header).await {
            Ok(response) => response,
            Err(err) => {
                match &err {
                    Error::InvalidRange(_) | Error::RangeOutOfBounds { .. } => {
                        tracing::debug!(error = %err, "Range not satisfiable");
                    }
                    Error::Io { .. } => {
                        tracing::error!(error = %err, "Playback failed");
                    }
                    Error::NotFound { .. } => {}
                }
                PlaybackResponse::from_error(&err)
            }
        }
    }

    async fn try_handle(
        &self,
        resource_id: &str,
        range_header: Option<&str>,
    ) -> Result<PlaybackResponse> {
        let record = self.resolver.resolve(resource_id).await.map_err(|e| {
            tracing::warn!(reason = "record", error = %e, "Video not found");
            e
        })?;

        let path = record.path.as_path();
        if !self.storage.exists(path).await {
            tracing::warn!(
                reason = "file",
                path = %path.display(),
                "Video record exists but its file is missing"
            );
            return Err(Error::not_found("file", path.display()));
        }

        let size = self.storage.file_size(path).await.map_err(|e| {
            tracing::warn!(
                reason = "file",
                path = %path.display(),
                error = %e,
                "Could not stat video file"
            );
            Error::not_found("file", path.display())
        })?;

        let resource = MediaResource {
            path,
            size,
            content_type: HeaderValue::from_str(&record.content_type)
                .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_CONTENT_TYPE)),
        };

        match range_header {
            None => self.full(resource_id, &resource).await,
            Some(value) => {
                let range = RangeRequest::parse(value)?.resolve(resource.size)?;
                self.partial(&resource, range).await
            }
        }
    }

    async fn full(
        &self,
        resource_id: &str,
        resource: &MediaResource<'_>,
    ) -> Result<PlaybackResponse> {
        let reader = self.open(resource.path).await?;
        let stream = ChunkStream::new(reader, resource.size);

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, resource.content_type.clone());
        headers.insert(header::CONTENT_DISPOSITION, inline_disposition(resource_id));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(resource.size));

        tracing::debug!(size = resource.size, "Streaming full file");

        Ok(PlaybackResponse {
            status: StatusCode::OK,
            headers,
            body: PlaybackBody::Stream(stream),
        })
    }

    async fn partial(
        &self,
        resource: &MediaResource<'_>,
        range: ByteRange,
    ) -> Result<PlaybackResponse> {
        let reader = self.open(resource.path).await?;
        let stream = ChunkStream::for_range(reader, range).await?;

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, resource.content_type.clone());
        headers.insert(
            header::CONTENT_RANGE,
            ascii_value(range.content_range(resource.size)),
        );
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(range.len()));

        tracing::debug!(
            start = range.start,
            end = range.end,
            size = resource.size,
            "Streaming partial content"
        );

        Ok(PlaybackResponse {
            status: StatusCode::PARTIAL_CONTENT,
            headers,
            body: PlaybackBody::Stream(stream),
        })
    }

    async fn open(&self, path: &Path) -> Result<Box<dyn SeekableRead>> {
        self.storage.open_for_read(path).await.map_err(|e| {
            tracing::warn!(
                reason = "open",
                path = %path.display(),
                error = %e,
                "Could not open video file"
            );
            Error::not_found("file", path.display())
        })
    }
}

impl std::fmt::Debug for RangeStreamer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeStreamer").finish_non_exhaustive()
    }
}

/// `inline; filename="<name>"`, or plain `inline` when the name cannot be
/// carried in a header.
fn inline_disposition(name: &str) -> HeaderValue {
    let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
    HeaderValue::from_str(&format!("inline; filename=\"{escaped}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("inline"))
}

fn ascii_value(value: String) -> HeaderValue {
    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static(""))
}
