//! Splits the head of a request from the bytes that follow it.
//!
//! The connection is read in fixed-size chunks until `CR LF CR LF` shows up,
//! possibly spread over several reads. Bytes that arrived in the same read
//! after the delimiter are handed back as the provisional body.

use std::io::ErrorKind;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::FramingError;

use super::REQUEST_DELIMITER;

pub const DEFAULT_CHUNK_SIZE: usize = 256;
pub const DEFAULT_MAX_HEADER_SIZE: usize = 8 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Upper bound for the header segment, delimiter excluded.
    pub max_header_size: usize,
    /// Size of each read issued against the connection.
    pub chunk_size: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_header_size: DEFAULT_MAX_HEADER_SIZE,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

#[derive(Debug, Default)]
pub struct Frame {
    /// Request line and header lines, without the delimiter.
    pub header: BytesMut,
    /// Bytes read past the delimiter.
    pub body: BytesMut,
}

/// Counts how many delimiter bytes have been seen in a row.
#[derive(Debug, Default)]
struct DelimiterMatcher {
    matched: usize,
}

impl DelimiterMatcher {
    /// Returns the offset right after the delimiter when `chunk` completes it.
    fn feed(&mut self, chunk: &[u8]) -> Option<usize> {
        for (i, &byte) in chunk.iter().enumerate() {
            self.matched = if byte == REQUEST_DELIMITER[self.matched] {
                self.matched + 1
            } else if byte == REQUEST_DELIMITER[0] {
                1
            } else {
                0
            };

            if self.matched == REQUEST_DELIMITER.len() {
                self.matched = 0;
                return Some(i + 1);
            }
        }

        None
    }
}

pub async fn read_frame<R>(reader: &mut R, limits: &Limits) -> Result<Frame, FramingError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0; limits.chunk_size.max(1)];
    let mut header = BytesMut::new();
    let mut matcher = DelimiterMatcher::default();

    loop {
        let n = match reader.read(&mut buf).await {
            Ok(0) => {
                return Err(FramingError::UnexpectedEof {
                    received: header.len(),
                })
            }
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };
        let chunk = &buf[..n];

        if let Some(end) = matcher.feed(chunk) {
            header.extend_from_slice(&chunk[..end]);
            header.truncate(header.len() - REQUEST_DELIMITER.len());
            if header.len() > limits.max_header_size {
                break;
            }

            let body = BytesMut::from(&chunk[end..]);
            return Ok(Frame { header, body });
        }

        header.extend_from_slice(chunk);
        if header.len() > limits.max_header_size + REQUEST_DELIMITER.len() {
            break;
        }
    }

    Err(FramingError::TooLarge {
        limit: limits.max_header_size,
    })
}
