//! Static sets of recognized names.
//!
//! The sets are built once on first access and never written afterwards, so
//! every connection task can read them without synchronization.

use std::{collections::BTreeSet, fmt};

use once_cell::sync::Lazy;

use super::request_line::Method;

pub static METHODS: Lazy<NameSet> = Lazy::new(|| Method::ALL.iter().map(Method::as_str).collect());

pub static HEADERS: Lazy<NameSet> = Lazy::new(|| {
    NameSet::new([
        // general-header
        "Cache-Control",
        "Connection",
        "Date",
        "Pragma",
        "Trailer",
        "Transfer-Encoding",
        "Upgrade",
        "Via",
        "Warning",
        // request-header
        "Accept",
        "Accept-Charset",
        "Accept-Encoding",
        "Accept-Language",
        "Authorization",
        "Expect",
        "From",
        "Host",
        "If-Match",
        "If-Modified-Since",
        "If-None-Match",
        "If-Range",
        "If-Unmodified-Since",
        "Max-Forwards",
        "Proxy-Authorization",
        "Range",
        "Referer",
        "TE",
        "User-Agent",
        // entity-header
        "Allow",
        "Content-Encoding",
        "Content-Language",
        "Content-Length",
        "Content-Location",
        "Content-MD5",
        "Content-Range",
        "Content-Type",
        "Expires",
        "Last-Modified",
        "extension-header",
    ])
});

/// Sorted set of static names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameSet {
    names: BTreeSet<&'static str>,
}

impl NameSet {
    pub fn new<I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        names.into_iter().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn contains_ignore_case(&self, name: &str) -> bool {
        self.names.iter().any(|n| n.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.names.iter().copied()
    }

    /// Builds a pattern group matching any member, e.g. `(GET|POST)`, or
    /// `(?i)(GET|POST)` when `case_insensitive` is set.
    pub fn alternation(&self, case_insensitive: bool) -> String {
        let flag = if case_insensitive { "(?i)" } else { "" };
        let names = self.iter().collect::<Vec<_>>().join("|");
        format!("{flag}({names})")
    }
}

impl FromIterator<&'static str> for NameSet {
    fn from_iter<T: IntoIterator<Item = &'static str>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for NameSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}
