use std::io::{self, ErrorKind};

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::RequestError;

use super::{Headers, Method, CONTENT_LENGTH};

/// Reads the declared `Content-Length` of a request.
pub fn content_length(headers: &Headers) -> Result<usize, RequestError> {
    let value = headers.get(CONTENT_LENGTH).ok_or(RequestError::MissingLength)?;
    let digits = value.trim_end();

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RequestError::LengthFormat {
            value: value.clone(),
        });
    }

    digits.parse().map_err(|_| RequestError::LengthFormat {
        value: value.clone(),
    })
}

/// Completes the body of a request whose head has already been framed.
///
/// Methods without a body get an empty one, whatever was sent after the
/// head. Otherwise the body holds exactly `Content-Length` bytes.
pub async fn resolve<R>(
    reader: &mut R,
    method: Method,
    headers: &Headers,
    provisional: BytesMut,
    chunk_size: usize,
) -> Result<Bytes, RequestError>
where
    R: AsyncRead + Unpin,
{
    if !method.carries_body() {
        return Ok(Bytes::new());
    }

    let expected = content_length(headers)?;
    read_exact(reader, expected, provisional, chunk_size).await
}

async fn read_exact<R>(
    reader: &mut R,
    expected: usize,
    mut body: BytesMut,
    chunk_size: usize,
) -> Result<Bytes, RequestError>
where
    R: AsyncRead + Unpin,
{
    if body.len() >= expected {
        body.truncate(expected);
        return Ok(body.freeze());
    }

    let truncated = |received, source| RequestError::ConnectionTruncated {
        expected,
        received,
        source,
    };

    let mut buf = vec![0; chunk_size.max(1)];
    while body.len() < expected {
        let want = (expected - body.len()).min(buf.len());
        match reader.read(&mut buf[..want]).await {
            Ok(0) => return Err(truncated(body.len(), io::Error::from(ErrorKind::UnexpectedEof))),
            Ok(n) => body.extend_from_slice(&buf[..n]),
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(truncated(body.len(), err)),
        }
    }

    Ok(body.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::ChunkedReader;

    fn headers(length: &str) -> Headers {
        Headers::from([(CONTENT_LENGTH.to_owned(), length.to_owned())])
    }

    #[test]
    fn parses_length() {
        assert_eq!(content_length(&headers("0")).unwrap(), 0);
        assert_eq!(content_length(&headers("42")).unwrap(), 42);
        assert_eq!(content_length(&headers("7  ")).unwrap(), 7);
    }

    #[test]
    fn missing_length() {
        let err = content_length(&Headers::new()).unwrap_err();
        assert!(matches!(err, RequestError::MissingLength));

        // Names are matched exactly as received.
        let lower = Headers::from([("content-length".to_owned(), "3".to_owned())]);
        assert!(matches!(content_length(&lower), Err(RequestError::MissingLength)));
    }

    #[test]
    fn rejects_non_numeric_length() {
        for value in ["", "abc", "-1", "+5", "1.5", "99999999999999999999999999"] {
            let err = content_length(&headers(value)).unwrap_err();
            assert!(
                matches!(&err, RequestError::LengthFormat { value: v } if v == value),
                "{value:?} gave {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn reads_remaining_bytes_over_several_reads() {
        let mut reader = ChunkedReader::new(&[&b"l"[..], &b"lo"[..], &b" wor"[..], &b"ld"[..]]);
        let body = resolve(
            &mut reader,
            Method::Post,
            &headers("11"),
            BytesMut::from(&b"he"[..]),
            256,
        )
        .await
        .unwrap();
        assert_eq!(&body[..], b"hello world");
    }

    #[tokio::test]
    async fn never_reads_past_declared_length() {
        let mut reader = ChunkedReader::new(&[b"lloEXTRA"]);
        let body = resolve(&mut reader, Method::Put, &headers("5"), BytesMut::from(&b"he"[..]), 256)
            .await
            .unwrap();
        assert_eq!(&body[..], b"hello");

        let mut rest = Vec::new();
        reader.read_to_end(&mut rest).await.unwrap();
        assert_eq!(rest, b"EXTRA");
    }

    #[tokio::test]
    async fn provisional_segment_longer_than_declared() {
        let mut reader = ChunkedReader::new::<&[u8]>(&[]);
        let body = resolve(
            &mut reader,
            Method::Post,
            &headers("3"),
            BytesMut::from(&b"abcdef"[..]),
            256,
        )
        .await
        .unwrap();
        assert_eq!(&body[..], b"abc");
    }

    #[tokio::test]
    async fn bodiless_methods_ignore_trailing_bytes() {
        let mut reader = ChunkedReader::new(&[b"more"]);
        let body = resolve(&mut reader, Method::Get, &Headers::new(), BytesMut::from(&b"x"[..]), 256)
            .await
            .unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn post_without_length_fails() {
        let mut reader = ChunkedReader::new(&[b"hello"]);
        let err = resolve(&mut reader, Method::Post, &Headers::new(), BytesMut::new(), 256)
            .await
            .unwrap_err();
        assert!(matches!(err, RequestError::MissingLength));
    }

    #[tokio::test]
    async fn peer_closes_early() {
        let mut reader = ChunkedReader::new(&[b"hel"]);
        let err = resolve(&mut reader, Method::Post, &headers("5"), BytesMut::new(), 256)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RequestError::ConnectionTruncated { expected: 5, received: 3, ref source }
                if source.kind() == ErrorKind::UnexpectedEof
        ));
    }

    #[tokio::test]
    async fn read_error_truncates() {
        let mut reader = ChunkedReader::new(&[b"h"]).then_fail(ErrorKind::ConnectionReset);
        let err = resolve(&mut reader, Method::Post, &headers("5"), BytesMut::new(), 2)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RequestError::ConnectionTruncated { received: 1, ref source, .. }
                if source.kind() == ErrorKind::ConnectionReset
        ));
    }
}
