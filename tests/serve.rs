//! End-to-end: a resource behind a real hyper connection.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use http::{Method, StatusCode};
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use serde::{Deserialize, Serialize};
use tinct::{Error, Json, Request, Resource, Response, decode_request, encode_response};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Debug, Deserialize, Serialize)]
struct Note {
    text: String,
}

async fn show(_req: Request) -> Json<Note> {
    Json(Note { text: "hello".into() })
}

async fn create(mut req: Request) -> Response {
    match decode_request::<Note>(&mut req).await {
        Ok(note) => encode_response(StatusCode::CREATED, &note)
            .unwrap_or_else(|_| Response::status(StatusCode::INTERNAL_SERVER_ERROR)),
        Err(Error::Deserialization(e)) => Response::builder()
            .status(StatusCode::BAD_REQUEST)
            .text(format!("bad note: {e}")),
        Err(e) => Response::builder()
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .text(e.to_string()),
    }
}

/// Serves `resource` on an ephemeral port, one task per connection.
async fn spawn(resource: Resource) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let resource = Arc::new(resource);

    tokio::spawn(async move {
        loop {
            let (stream, _) = listener.accept().await.unwrap();
            let resource = Arc::clone(&resource);
            tokio::spawn(async move {
                let svc = service_fn(move |req| {
                    let fut = resource.dispatch(Request::new(req));
                    async move { Ok::<_, Infallible>(fut.await.into_http()) }
                });
                let _ = ConnBuilder::new(TokioExecutor::new())
                    .serve_connection(TokioIo::new(stream), svc)
                    .await;
            });
        }
    });

    addr
}

struct Raw {
    status: u16,
    head: String,
    body: String,
}

impl Raw {
    fn header(&self, name: &str) -> Option<&str> {
        self.head.lines().skip(1).find_map(|line| {
            let (k, v) = line.split_once(':')?;
            k.trim().eq_ignore_ascii_case(name).then(|| v.trim())
        })
    }
}

async fn send(addr: SocketAddr, method: &str, body: &str) -> Raw {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let req = format!(
        "{method} /notes HTTP/1.1\r\nhost: test\r\nconnection: close\r\ncontent-length: {}\r\n\r\n{body}",
        body.len(),
    );
    stream.write_all(req.as_bytes()).await.unwrap();

    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.unwrap();

    let (head, body) = raw.split_once("\r\n\r\n").unwrap();
    let status = head.split_whitespace().nth(1).unwrap().parse().unwrap();
    Raw { status, head: head.to_owned(), body: body.to_owned() }
}

#[tokio::test]
async fn answers_bound_methods_with_json() {
    let addr = spawn(Resource::new().on(Method::GET, show).on(Method::POST, create)).await;

    let res = send(addr, "GET", "").await;
    assert_eq!(res.status, 200);
    assert_eq!(res.header("content-type"), Some("application/json"));
    assert_eq!(res.body, r#"{"text":"hello"}"#);

    let res = send(addr, "POST", r#"{"text":"new"}"#).await;
    assert_eq!(res.status, 201);
    assert_eq!(res.body, r#"{"text":"new"}"#);
}

#[tokio::test]
async fn rejects_a_body_of_the_wrong_shape() {
    let addr = spawn(Resource::new().on(Method::POST, create)).await;

    let res = send(addr, "POST", r#"{"text":1}"#).await;
    assert_eq!(res.status, 400);
    assert!(res.body.starts_with("bad note: invalid type"));
}

#[tokio::test]
async fn synthesizes_options_and_405() {
    let addr = spawn(Resource::new().on(Method::GET, show).on(Method::POST, create)).await;

    let res = send(addr, "OPTIONS", "").await;
    assert_eq!(res.status, 200);
    assert_eq!(res.header("allow"), Some("GET, POST"));
    assert_eq!(res.body, "");

    let res = send(addr, "DELETE", "").await;
    assert_eq!(res.status, 405);
    assert_eq!(res.header("allow"), Some("GET, POST"));
    assert_eq!(res.body, "Not allowed\n");
    assert_eq!(res.header("x-content-type-options"), Some("nosniff"));
}

#[tokio::test]
async fn empty_resource_is_404_on_the_wire() {
    let addr = spawn(Resource::new()).await;

    let res = send(addr, "OPTIONS", "").await;
    assert_eq!(res.status, 404);
    assert_eq!(res.header("allow"), None);
    assert_eq!(res.body, "Not found\n");
}
