//! # tinct
//!
//! Small helpers for hyper services. Nothing more.
//!
//! ## What's here
//!
//! - [`encode_response`] / [`decode_request`] — JSON in, JSON out, errors
//!   handed back to you instead of written to the wire
//! - [`Resource`] — one endpoint, one handler per method, `OPTIONS` and
//!   `405 Method Not Allowed` with a correct `Allow` header for free
//!
//! ## What isn't
//!
//! Routing, middleware, content negotiation, CORS, connections, TLS.
//! A `Resource` is a hyper `Service`; put whatever server or router you
//! like in front of it.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use http::{Method, StatusCode};
//! use serde::{Deserialize, Serialize};
//! use tinct::{Request, Resource, Response, decode_request, encode_response};
//!
//! #[derive(Deserialize, Serialize)]
//! struct Note { text: String }
//!
//! async fn create(mut req: Request) -> Response {
//!     let note: Note = match decode_request(&mut req).await {
//!         Ok(note) => note,
//!         Err(e) => return Response::builder()
//!             .status(StatusCode::BAD_REQUEST)
//!             .text(e.to_string()),
//!     };
//!     encode_response(StatusCode::CREATED, &note)
//!         .unwrap_or_else(|_| Response::status(StatusCode::INTERNAL_SERVER_ERROR))
//! }
//!
//! let notes = Resource::new().on(Method::POST, create);
//! // OPTIONS → 200, Allow: POST
//! // GET     → 405, Allow: POST
//! ```

mod codec;
mod error;
mod handler;
mod request;
mod resource;
mod response;

pub use codec::{Json, decode_request, encode_response};
pub use error::Error;
pub use handler::Handler;
pub use request::{Body, BoxError, Request};
pub use resource::Resource;
pub use response::{IntoResponse, Response, ResponseBuilder};
