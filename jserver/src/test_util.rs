use std::{
    collections::VecDeque,
    io,
    pin::Pin,
    task::{Context, Poll},
};

use tokio::io::{AsyncRead, ReadBuf};

/// Hands out one scripted chunk per read, then end-of-stream or an error.
#[derive(Debug, Default)]
pub struct ChunkedReader {
    chunks: VecDeque<Vec<u8>>,
    fail_with: Option<io::ErrorKind>,
}

impl ChunkedReader {
    pub fn new<C: AsRef<[u8]>>(chunks: &[C]) -> Self {
        Self {
            chunks: chunks.iter().map(|c| c.as_ref().to_vec()).collect(),
            fail_with: None,
        }
    }

    pub fn then_fail(mut self, kind: io::ErrorKind) -> Self {
        self.fail_with = Some(kind);
        self
    }
}

impl AsyncRead for ChunkedReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let Some(mut chunk) = self.chunks.pop_front() else {
            return match self.fail_with {
                Some(kind) => Poll::Ready(Err(kind.into())),
                None => Poll::Ready(Ok(())),
            };
        };

        let n = chunk.len().min(buf.remaining());
        buf.put_slice(&chunk[..n]);
        if n < chunk.len() {
            chunk.drain(..n);
            self.chunks.push_front(chunk);
        }

        Poll::Ready(Ok(()))
    }
}
