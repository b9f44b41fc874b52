//! Per-method resources.
//!
//! A [`Resource`] is one logical endpoint. It maps HTTP methods to handlers,
//! answers `OPTIONS` itself, and refuses unbound methods with `405` and an
//! `Allow` header. It does no path matching: mount it wherever your server
//! or router sends requests for that endpoint.

use std::convert::Infallible;
use std::future::{Future, ready};
use std::pin::Pin;

use bytes::Bytes;
use http::{Method, StatusCode};
use http_body_util::Full;
use hyper::service::Service;
use tracing::debug;

use crate::handler::{BoxFuture, Erased, Handler, erase};
use crate::request::{BoxError, Request};
use crate::response::{Response, ResponseBuilder};

struct Binding {
    method: Method,
    handler: Erased,
}

/// An endpoint that responds to a set of HTTP methods.
///
/// Build it once, then share it. Binding needs `&mut self`; dispatch only
/// `&self`, so a resource behind an `Arc` is frozen.
///
/// ```rust
/// use http::Method;
/// use tinct::{Request, Resource, Response};
///
/// async fn show(_req: Request) -> Response { Response::text("widget") }
/// async fn update(_req: Request) -> Response { Response::text("updated") }
///
/// let widgets = Resource::new()
///     .on(Method::GET, show)
///     .on(Method::PUT, update);
///
/// assert_eq!(widgets.allow(), "GET, PUT");
/// ```
#[derive(Default)]
pub struct Resource {
    bindings: Vec<Binding>,
}

impl Resource {
    /// An empty resource. It answers `404` until a method is bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `handler` to `method`. Returns `self` for chaining.
    pub fn on(mut self, method: Method, handler: impl Handler) -> Self {
        self.handle(method, handler);
        self
    }

    /// Binds `handler` to `method`.
    ///
    /// Rebinding a method swaps its handler in place: the method keeps its
    /// position in the scan order and in [`allow`](Resource::allow).
    pub fn handle(&mut self, method: Method, handler: impl Handler) {
        let handler = erase(handler);
        match self.bindings.iter_mut().find(|b| b.method == method) {
            Some(binding) => binding.handler = handler,
            None => self.bindings.push(Binding { method, handler }),
        }
    }

    /// The bound methods in the order they were first bound.
    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.bindings.iter().map(|b| &b.method)
    }

    /// Value of the `Allow` header: bound methods joined by `", "`.
    pub fn allow(&self) -> String {
        self.methods().map(Method::as_str).collect::<Vec<_>>().join(", ")
    }

    pub fn len(&self) -> usize { self.bindings.len() }
    pub fn is_empty(&self) -> bool { self.bindings.is_empty() }

    /// Produces the response for `req`.
    ///
    /// | Request | Response |
    /// |---|---|
    /// | anything, nothing bound | `404`, `Not found` |
    /// | `OPTIONS` | `200`, `Allow`, empty body |
    /// | bound method | whatever its handler returns |
    /// | any other method | `405`, `Allow`, `Not allowed` |
    ///
    /// `OPTIONS` is answered here even when a handler is bound to it.
    /// The returned future does not borrow the resource.
    pub fn dispatch(&self, req: Request) -> impl Future<Output = Response> + Send + use<> {
        self.route(req)
    }

    fn route(&self, req: Request) -> BoxFuture {
        if self.bindings.is_empty() {
            debug!(method = %req.method(), "no methods bound");
            return Box::pin(ready(not_found()));
        }

        if *req.method() == Method::OPTIONS {
            let allow = self.allow();
            debug!(%allow, "options");
            return Box::pin(ready(
                Response::builder().header("allow", &allow).no_body(),
            ));
        }

        match self.bindings.iter().find(|b| b.method == *req.method()) {
            Some(binding) => (binding.handler)(req),
            None => {
                let allow = self.allow();
                debug!(method = %req.method(), %allow, "method not allowed");
                let res = Response::builder().header("allow", &allow);
                Box::pin(ready(plain_error(res, StatusCode::METHOD_NOT_ALLOWED, "Not allowed")))
            }
        }
    }
}

fn not_found() -> Response {
    plain_error(Response::builder(), StatusCode::NOT_FOUND, "Not found")
}

/// Plain-text error body with a trailing newline, never content-sniffed.
fn plain_error(res: ResponseBuilder, status: StatusCode, msg: &str) -> Response {
    res.status(status)
        .header("x-content-type-options", "nosniff")
        .text(format!("{msg}\n"))
}

/// A resource is a hyper service, so it can be handed to any hyper-based
/// server or router that accepts one.
impl<B> Service<http::Request<B>> for Resource
where
    B: hyper::body::Body<Data = Bytes> + Send + 'static,
    B::Error: Into<BoxError>,
{
    type Response = http::Response<Full<Bytes>>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Infallible>> + Send>>;

    fn call(&self, req: http::Request<B>) -> Self::Future {
        let fut = self.route(Request::new(req));
        Box::pin(async move { Ok(fut.await.into_http()) })
    }
}
