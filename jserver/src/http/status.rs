use std::fmt;

use crate::error::ResponseError;

use super::VERSION;

/// Registered status codes and their reason phrases.
pub const STATUS_CODES: &[(u16, &str)] = &[
    (200, "Ok"),
    (201, "Created"),
    (204, "No Content"),
    (400, "Bad Request"),
    (404, "Not Found"),
    (500, "Internal Server Error"),
];

pub fn reason_phrase(code: u16) -> Option<&'static str> {
    STATUS_CODES
        .iter()
        .find_map(|&(c, phrase)| (c == code).then_some(phrase))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusLine {
    version: &'static str,
    code: u16,
    reason: &'static str,
}

impl StatusLine {
    pub fn new(code: u16) -> Result<Self, ResponseError> {
        let reason = reason_phrase(code).ok_or(ResponseError::UnknownStatusCode(code))?;

        Ok(Self {
            version: VERSION,
            code,
            reason,
        })
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.version, self.code, self.reason)
    }
}
