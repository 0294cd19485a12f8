use std::collections::BTreeMap;

use crate::error::RequestError;

use super::registry::NameSet;

/// Header names are kept exactly as received; a repeated name keeps its
/// last value.
pub type Headers = BTreeMap<String, String>;

/// Yields the lines of `buf` with their `\n` or `\r\n` terminator removed.
pub(crate) fn lines(buf: &[u8]) -> impl Iterator<Item = &[u8]> {
    buf.split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
}

/// Decodes `Name: Value` lines until the first blank line. Names outside
/// `recognized` are kept, only logged.
pub fn decode<'a, I>(lines: I, recognized: &NameSet) -> Result<Headers, RequestError>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut headers = Headers::new();

    for line in lines {
        if line.is_empty() {
            break;
        }

        let (name, value) = decode_line(line).ok_or_else(|| RequestError::HeaderFormat {
            line: String::from_utf8_lossy(line).into_owned(),
        })?;

        if !recognized.contains(name) {
            tracing::debug!(name, "unrecognized header");
        }
        headers.insert(name.to_owned(), value.to_owned());
    }

    Ok(headers)
}

fn decode_line(line: &[u8]) -> Option<(&str, &str)> {
    let line = std::str::from_utf8(line).ok()?;
    let colon = memchr::memchr(b':', line.as_bytes())?;

    let name = &line[..colon];
    let value = line[colon + 1..].trim_start_matches([' ', '\t']);
    if name.is_empty() {
        return None;
    }

    Some((name, value))
}
