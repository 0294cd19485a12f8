pub const LINE_DELIMITER: &[u8] = b"\r\n";
pub const REQUEST_DELIMITER: &[u8; 4] = b"\r\n\r\n";

pub const VERSION: &str = "HTTP/1.1";
pub const CONTENT_LENGTH: &str = "Content-Length";

pub mod body;
pub mod codec;
pub mod framer;
pub mod headers;
pub mod registry;
pub mod request;
pub mod request_line;
pub mod response;
pub mod status;

pub use framer::Limits;
pub use headers::Headers;
pub use request::Request;
pub use request_line::{Method, RequestLine};
pub use response::Response;
pub use status::StatusLine;
