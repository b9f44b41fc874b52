//! JSON request and response shims.
//!
//! Two functions and a wrapper. Neither function ever writes an error
//! response: failures come back as [`Error`] and the caller picks the status.

use std::io;

use http::StatusCode;
use http_body_util::BodyExt;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use tracing::error;

use crate::error::Error;
use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// Serialises `value` into a JSON response with the given status.
///
/// The value is fully encoded before a [`Response`] exists, so a failure
/// leaves nothing behind: no status, no headers, no partial body.
///
/// ```rust
/// use http::StatusCode;
/// use tinct::encode_response;
///
/// let res = encode_response(StatusCode::CREATED, &serde_json::json!({"id": 7})).unwrap();
/// assert_eq!(res.header("content-type"), Some("application/json"));
/// assert_eq!(res.body(), br#"{"id":7}"#);
/// ```
pub fn encode_response<T>(status: StatusCode, value: &T) -> Result<Response, Error>
where
    T: Serialize + ?Sized,
{
    let body = serde_json::to_vec(value).map_err(Error::Serialization)?;
    Ok(Response::builder().status(status).json(body))
}

/// Reads the request body and decodes one JSON value from it.
///
/// Decoding stops after the first complete value; anything after it is
/// ignored, as with a streaming decoder. An empty body is an end-of-input
/// (`Category::Eof`) error. Body stream failures surface as an I/O-category
/// `serde_json::Error`. No size limit is applied: put one in front of the
/// service if you need it.
pub async fn decode_request<T>(req: &mut Request) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    let bytes = req.body_mut()
        .collect()
        .await
        .map_err(|e| Error::Deserialization(serde_json::Error::io(io::Error::other(e))))?
        .to_bytes();

    // No `end()`: bytes after the first value are left unread.
    T::deserialize(&mut serde_json::Deserializer::from_slice(&bytes))
        .map_err(Error::Deserialization)
}

/// A serde value returned from a handler as a `200 OK` JSON response.
///
/// Use [`encode_response`] directly when you need another status or want to
/// handle the serialisation failure yourself; `Json` answers it with an
/// empty `500`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        match encode_response(StatusCode::OK, &self.0) {
            Ok(res) => res,
            Err(e) => {
                error!("json response: {e}");
                Response::status(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}
