use bytes::{BufMut, Bytes, BytesMut};

use crate::error::ResponseError;

use super::{Headers, StatusLine, LINE_DELIMITER};

/// A response is only ever built with a registered status code, so
/// serializing it cannot fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    status: StatusLine,
    headers: Headers,
    body: String,
}

impl Response {
    pub fn new(code: u16, headers: Headers, body: impl Into<String>) -> Result<Self, ResponseError> {
        Ok(Self {
            status: StatusLine::new(code)?,
            headers,
            body: body.into(),
        })
    }

    pub fn ok(body: impl Into<String>) -> Result<Self, ResponseError> {
        Self::new(200, Headers::new(), body)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Status line, one `Name: Value` line per header, a blank line, then
    /// the body.
    pub fn write_to(&self, dst: &mut BytesMut) {
        let status = self.status.to_string();
        dst.reserve(status.len() + self.body.len() + 2 * LINE_DELIMITER.len());

        dst.put_slice(status.as_bytes());
        dst.put_slice(LINE_DELIMITER);

        for (name, value) in &self.headers {
            dst.put_slice(name.as_bytes());
            dst.put_slice(b": ");
            dst.put_slice(value.as_bytes());
            dst.put_slice(LINE_DELIMITER);
        }

        dst.put_slice(LINE_DELIMITER);
        dst.put_slice(self.body.as_bytes());
    }

    pub fn to_bytes(&self) -> Bytes {
        let mut dst = BytesMut::new();
        self.write_to(&mut dst);
        dst.freeze()
    }
}
