//! `Range` header parsing.
//!
//! Only single byte ranges with an explicit start are honored:
//!
//! - `bytes=500-999`
//! - `bytes=500-` (to the end of the file)
//!
//! Suffix ranges (`bytes=-500`), multi-range requests and other units are
//! rejected and answered with 416 by the streamer.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A parsed `Range` header, not yet checked against a resource size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeRequest {
    /// First requested byte.
    pub start: u64,
    /// Last requested byte, `None` for open-ended ranges.
    pub end: Option<u64>,
}

/// An inclusive byte range that is known to lie inside a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// First byte, inclusive.
    pub start: u64,
    /// Last byte, inclusive.
    pub end: u64,
}

impl RangeRequest {
    /// Parse a raw `Range` header value.
    pub fn parse(value: &str) -> Result<Self> {
        let (unit, ranges) = value
            .trim()
            .split_once('=')
            .ok_or_else(|| Error::invalid_range("missing '='"))?;

        if !unit.trim().eq_ignore_ascii_case("bytes") {
            return Err(Error::invalid_range(format!(
                "unsupported unit '{}'",
                unit.trim()
            )));
        }
        if ranges.contains(',') {
            return Err(Error::invalid_range("multiple ranges"));
        }

        let (start, end) = ranges
            .split_once('-')
            .ok_or_else(|| Error::invalid_range("missing '-'"))?;

        let start = start.trim();
        if start.is_empty() {
            return Err(Error::invalid_range("suffix ranges are not supported"));
        }
        let start = parse_offset(start)?;

        let end = match end.trim() {
            "" => None,
            end => Some(parse_offset(end)?),
        };

        if let Some(end) = end {
            if end < start {
                return Err(Error::invalid_range(format!(
                    "end {end} before start {start}"
                )));
            }
        }

        Ok(Self { start, end })
    }

    /// Check the request against the resource size.
    ///
    /// The start is checked before the end is clamped, so a start at or past
    /// EOF is an error even when the end would clamp into range. An end past
    /// EOF is clamped to the last byte.
    pub fn resolve(&self, size: u64) -> Result<ByteRange> {
        if self.start >= size {
            return Err(Error::RangeOutOfBounds {
                start: self.start,
                size,
            });
        }

        let last = size - 1;
        let end = self.end.map_or(last, |end| end.min(last));

        Ok(ByteRange {
            start: self.start,
            end,
        })
    }
}

impl FromStr for RangeRequest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn parse_offset(s: &str) -> Result<u64> {
    // u64::from_str accepts a leading '+', a header must not.
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_range(format!("non-numeric offset '{s}'")));
    }
    s.parse()
        .map_err(|_| Error::invalid_range(format!("offset '{s}' out of range")))
}

impl ByteRange {
    /// The range covering a whole resource of `size` bytes, if it has any.
    pub fn full(size: u64) -> Option<Self> {
        size.checked_sub(1).map(|end| Self { start: 0, end })
    }

    /// Number of bytes covered.
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Always false: a byte range covers at least one byte.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// `Content-Range` header value for a resource of `size` bytes.
    pub fn content_range(&self, size: u64) -> String {
        format!("bytes {}-{}/{}", self.start, self.end, size)
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
