use std::{fmt, str::FromStr};

use crate::error::RequestLineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Options,
    Get,
    Head,
    Post,
    Put,
    Delete,
    Trace,
    Connect,
}

impl Method {
    pub const ALL: [Method; 8] = [
        Method::Options,
        Method::Get,
        Method::Head,
        Method::Post,
        Method::Put,
        Method::Delete,
        Method::Trace,
        Method::Connect,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Options => "OPTIONS",
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Trace => "TRACE",
            Method::Connect => "CONNECT",
        }
    }

    /// Methods whose body length is taken from `Content-Length`.
    pub fn carries_body(&self) -> bool {
        matches!(self, Method::Post | Method::Put)
    }
}

impl FromStr for Method {
    type Err = RequestLineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "OPTIONS" => Method::Options,
            "GET" => Method::Get,
            "HEAD" => Method::Head,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            "TRACE" => Method::Trace,
            "CONNECT" => Method::Connect,
            _ => return Err(RequestLineError::UnknownMethod(s.to_owned())),
        })
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestLine {
    method: Method,
    target: String,
    version: String,
}

impl RequestLine {
    /// Decodes `METHOD SP TARGET SP VERSION`, without the line terminator.
    pub fn decode(line: &[u8]) -> Result<Self, RequestLineError> {
        let mut line = std::str::from_utf8(line).map_err(|_| RequestLineError::Encoding)?;

        let method = split_to_space(&mut line)?;
        let target = split_to_space(&mut line)?;
        let version = line;

        let method = method.parse()?;
        if target.is_empty() {
            return Err(RequestLineError::Malformed);
        }
        if !is_version(version) {
            return Err(RequestLineError::InvalidVersion(version.to_owned()));
        }

        Ok(Self {
            method,
            target: target.to_owned(),
            version: version.to_owned(),
        })
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

#[inline]
fn split_to_space<'a>(buf: &mut &'a str) -> Result<&'a str, RequestLineError> {
    memchr::memchr(b' ', buf.as_bytes())
        .map(|e| {
            let part = &buf[..e];
            *buf = &buf[e + 1..];
            part
        })
        .ok_or(RequestLineError::Malformed)
}

// HTTP/<digits>.<digits>
fn is_version(version: &str) -> bool {
    let Some(numbers) = version.strip_prefix("HTTP/") else {
        return false;
    };
    let Some((major, minor)) = numbers.split_once('.') else {
        return false;
    };

    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    digits(major) && digits(minor)
}
