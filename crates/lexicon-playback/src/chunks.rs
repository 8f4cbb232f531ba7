//! Fixed-size chunked reads over a byte source.
//!
//! [`ChunkStream`] owns its reader. Dropping the stream (for example when the
//! client disconnects and hyper drops the body) drops the reader and closes
//! the file; no read is issued once the consumer stops polling.

use std::io::{self, SeekFrom};
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::Stream;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt};

use crate::range::ByteRange;

/// Size of every chunk except possibly the last.
pub const CHUNK_SIZE: usize = 8192;

/// A stream of [`CHUNK_SIZE`] buffers covering exactly `len` bytes.
///
/// Short reads from the reader are accumulated, so only the final chunk can
/// be shorter than [`CHUNK_SIZE`]. A read error, or EOF before `len` bytes,
/// is logged and yielded as the last item.
pub struct ChunkStream {
    inner: Pin<Box<dyn Stream<Item = io::Result<Bytes>> + Send>>,
    len: u64,
}

impl ChunkStream {
    /// Stream `len` bytes from the reader's current position.
    pub fn new<R>(reader: R, len: u64) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        let span = tracing::Span::current();

        let inner = async_stream::stream! {
            let mut reader = reader;
            let mut remaining = len;

            'chunks: while remaining > 0 {
                let want = remaining.min(CHUNK_SIZE as u64) as usize;
                let mut buf = vec![0u8; want];
                let mut filled = 0;

                while filled < want {
                    match reader.read(&mut buf[filled..]).await {
                        Ok(0) => {
                            tracing::error!(
                                parent: &span,
                                remaining = remaining - filled as u64,
                                "File ended before the requested range was streamed"
                            );
                            yield Err(io::Error::new(
                                io::ErrorKind::UnexpectedEof,
                                "file shorter than expected",
                            ));
                            break 'chunks;
                        }
                        Ok(n) => filled += n,
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                        Err(e) => {
                            tracing::error!(
                                parent: &span,
                                error = %e,
                                remaining,
                                "Read failed mid-stream, aborting body"
                            );
                            yield Err(e);
                            break 'chunks;
                        }
                    }
                }

                remaining -= want as u64;
                yield Ok(Bytes::from(buf));
            }
        };

        Self {
            inner: Box::pin(inner),
            len,
        }
    }

    /// Seek the reader to the start of `range` and stream it.
    pub async fn for_range<R>(mut reader: R, range: ByteRange) -> io::Result<Self>
    where
        R: AsyncRead + AsyncSeek + Send + Unpin + 'static,
    {
        reader.seek(SeekFrom::Start(range.start)).await?;
        Ok(Self::new(reader, range.len()))
    }

    /// Total number of bytes the stream yields when it completes.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Stream for ChunkStream {
    type Item = io::Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl std::fmt::Debug for ChunkStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkStream").field("len", &self.len).finish()
    }
}
