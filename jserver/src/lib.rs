//! A minimal HTTP/1.1 server: one request per connection, read to
//! completion, answered once, then closed.

use std::time::Duration;

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod server;

#[cfg(test)]
mod test_util;

pub const TIMEOUT_DURATION: Duration = Duration::from_secs(15);
