use crate::{
    error::ResponseError,
    http::{Headers, Request, Response},
};

/// Answers every request with `200 Ok` and the request body.
pub async fn echo(request: Request, _state: ()) -> Result<Response, ResponseError> {
    let body = String::from_utf8_lossy(request.body()).into_owned();
    Response::new(200, Headers::new(), body)
}
