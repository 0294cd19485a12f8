use bytes::Bytes;
use tokio::io::AsyncRead;

use crate::error::RequestError;

use super::{
    body,
    framer::{self, Frame, Limits},
    headers,
    registry::HEADERS,
    Headers, Method, RequestLine,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    line: RequestLine,
    headers: Headers,
    body: Bytes,
}

impl Request {
    pub fn from_parts(line: RequestLine, headers: Headers, body: Bytes) -> Self {
        Self {
            line,
            headers,
            body,
        }
    }

    /// Reads one request from `reader`: frames the head, decodes it, then
    /// pulls whatever body the method and headers call for.
    pub async fn read<R>(reader: &mut R, limits: &Limits) -> Result<Self, RequestError>
    where
        R: AsyncRead + Unpin,
    {
        let Frame { header, body: provisional } = framer::read_frame(reader, limits).await?;
        let (line, headers) = decode_head(&header)?;
        let body =
            body::resolve(reader, line.method(), &headers, provisional, limits.chunk_size).await?;

        Ok(Self::from_parts(line, headers, body))
    }

    pub fn line(&self) -> &RequestLine {
        &self.line
    }

    pub fn method(&self) -> Method {
        self.line.method()
    }

    pub fn target(&self) -> &str {
        self.line.target()
    }

    pub fn version(&self) -> &str {
        self.line.version()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// The declared body length, under the same rules the body reader uses.
    pub fn content_length(&self) -> Option<usize> {
        body::content_length(&self.headers).ok()
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn body_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    pub fn into_body(self) -> Bytes {
        self.body
    }
}

/// Decodes the request line and header block of a framed head.
pub fn decode_head(header: &[u8]) -> Result<(RequestLine, Headers), RequestError> {
    let mut lines = headers::lines(header);
    let line = RequestLine::decode(lines.next().unwrap_or_default())?;
    let headers = headers::decode(lines, &HEADERS)?;

    Ok((line, headers))
}
