use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("failed to frame request: {0}")]
    Framing(#[from] FramingError),
    #[error("invalid request line: {0}")]
    RequestLine(#[from] RequestLineError),
    #[error("malformed header line {line:?}")]
    HeaderFormat { line: String },
    #[error("request carries a body but declares no Content-Length")]
    MissingLength,
    #[error("Content-Length {value:?} is not a non-negative integer")]
    LengthFormat { value: String },
    #[error("connection closed after {received} of {expected} body bytes")]
    ConnectionTruncated {
        expected: usize,
        received: usize,
        #[source]
        source: io::Error,
    },
    #[error("request was not received within the read timeout")]
    Timeout,
}

#[derive(Debug, Error)]
pub enum FramingError {
    #[error("connection ended after {received} bytes, before the end of the header block")]
    UnexpectedEof { received: usize },
    #[error("header block exceeds {limit} bytes")]
    TooLarge { limit: usize },
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestLineError {
    #[error("request line is not valid UTF-8")]
    Encoding,
    #[error("expected \"METHOD TARGET VERSION\"")]
    Malformed,
    #[error("unrecognized method {0:?}")]
    UnknownMethod(String),
    #[error("invalid version {0:?}")]
    InvalidVersion(String),
}

#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("status code {0} is not registered")]
    UnknownStatusCode(u16),
    #[error(transparent)]
    Io(#[from] io::Error),
}
