use bytes::BytesMut;
use tokio_util::codec::Encoder;

use crate::error::ResponseError;

use super::Response;

/// Write half of a connection: one `Response` per frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResponseCodec;

impl Encoder<Response> for ResponseCodec {
    type Error = ResponseError;

    fn encode(&mut self, response: Response, dst: &mut BytesMut) -> Result<(), Self::Error> {
        response.write_to(dst);
        Ok(())
    }
}
