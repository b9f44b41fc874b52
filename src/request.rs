//! Incoming HTTP request type.

use bytes::Bytes;
use http::request::Parts;
use http::{HeaderMap, Method, Uri};
use http_body_util::BodyExt;
use http_body_util::combinators::UnsyncBoxBody;

/// Boxed error produced by a request body stream.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The body of a [`Request`]: an unread byte stream with its concrete type
/// erased, so handlers see one request type whatever the server hands us.
pub type Body = UnsyncBoxBody<Bytes, BoxError>;

/// An incoming HTTP request.
///
/// The head is parsed; the body is still a stream. Read it with
/// [`decode_request`](crate::decode_request) or take it with
/// [`into_body`](Request::into_body).
pub struct Request {
    head: Parts,
    body: Body,
}

impl Request {
    /// Wraps any `http::Request` whose body yields [`Bytes`], such as hyper's
    /// `Incoming` or `http_body_util::Full<Bytes>`.
    pub fn new<B>(req: http::Request<B>) -> Self
    where
        B: hyper::body::Body<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
    {
        let (head, body) = req.into_parts();
        Self { head, body: body.map_err(Into::into).boxed_unsync() }
    }

    pub fn method(&self) -> &Method { &self.head.method }
    pub fn uri(&self) -> &Uri { &self.head.uri }
    pub fn path(&self) -> &str { self.head.uri.path() }
    pub fn headers(&self) -> &HeaderMap { &self.head.headers }

    /// Header lookup. Names are case-insensitive; values that are not
    /// visible ASCII read as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.headers.get(name)?.to_str().ok()
    }

    pub(crate) fn body_mut(&mut self) -> &mut Body { &mut self.body }

    pub fn into_body(self) -> Body { self.body }
}

impl<B> From<http::Request<B>> for Request
where
    B: hyper::body::Body<Data = Bytes> + Send + 'static,
    B::Error: Into<BoxError>,
{
    fn from(req: http::Request<B>) -> Self {
        Self::new(req)
    }
}
