//! lexicon-playback: seekable video playback over HTTP range requests.
//!
//! This crate holds everything a playback request needs and nothing about
//! how it reaches the wire:
//!
//! - **Range parsing**: [`RangeRequest`] and [`ByteRange`] for `Range: bytes=`
//! - **Chunked reads**: [`ChunkStream`], fixed [`CHUNK_SIZE`] buffers that own
//!   the file handle
//! - **Seams**: [`Resolver`] (identifier to record) and [`Storage`]
//!   (filesystem access), with [`Catalog`] and [`LocalStorage`] as the
//!   built-in implementations
//! - **Handler**: [`RangeStreamer::handle`], which turns an identifier and an
//!   optional `Range` header into a [`PlaybackResponse`]
//!
//! # Examples
//!
//! ```
//! use lexicon_playback::{ByteRange, RangeRequest};
//!
//! let range = RangeRequest::parse("bytes=500-").unwrap().resolve(1000).unwrap();
//! assert_eq!(range, ByteRange { start: 500, end: 999 });
//! assert_eq!(range.content_range(1000), "bytes 500-999/1000");
//! ```

pub mod catalog;
pub mod chunks;
pub mod error;
pub mod range;
pub mod response;
pub mod storage;
pub mod streamer;

pub use catalog::{content_type_for, Catalog, MediaRecord, Resolver};
pub use chunks::{ChunkStream, CHUNK_SIZE};
pub use error::{Error, Result};
pub use range::{ByteRange, RangeRequest};
pub use response::{PlaybackBody, PlaybackResponse};
pub use storage::{LocalStorage, SeekableRead, Storage};
pub use streamer::RangeStreamer;
