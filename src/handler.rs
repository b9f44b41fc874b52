//! The [`Handler`] trait.
//!
//! A resource keeps handlers of different concrete types side by side in
//! one `Vec`, so each is erased on the way in: wrapped in a closure that
//! boxes its future and converts its output with [`IntoResponse`], then
//! stored behind an `Arc`.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// What dispatch hands back: a boxed future that owns everything it needs.
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// A bound handler with its concrete type erased.
pub(crate) type Erased = Arc<dyn Fn(Request) -> BoxFuture + Send + Sync>;

/// A method handler: any `Fn(Request)` returning a future of something that
/// implements [`IntoResponse`].
///
/// ```rust
/// use http::{Method, StatusCode};
/// use tinct::{Request, Resource};
///
/// async fn remove(_req: Request) -> StatusCode { StatusCode::NO_CONTENT }
///
/// let tag = "v1";
/// Resource::new()
///     .on(Method::DELETE, remove)
///     .on(Method::GET, move |_req: Request| async move { format!("version {tag}") });
/// ```
///
/// Sealed; the blanket impl is the only one.
pub trait Handler: sealed::Erase + Send + Sync + 'static {}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

pub(crate) fn erase(handler: impl Handler) -> Erased {
    sealed::Erase::erase(handler)
}

mod sealed {
    use super::*;

    pub trait Erase {
        fn erase(self) -> Erased;
    }

    impl<F, Fut, R> Erase for F
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse + Send + 'static,
    {
        fn erase(self) -> Erased {
            Arc::new(move |req: Request| {
                let fut = (self)(req);
                Box::pin(async move { fut.await.into_response() }) as BoxFuture
            })
        }
    }
}
