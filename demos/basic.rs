//! Minimal tinct example — one JSON resource behind a hyper server.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example basic
//!
//! Try:
//!   curl -i http://localhost:3000/notes
//!   curl -i -X POST http://localhost:3000/notes -d '{"text":"buy milk"}'
//!   curl -i -X OPTIONS http://localhost:3000/notes
//!   curl -i -X DELETE http://localhost:3000/notes      → 405, Allow: GET, POST
//!
//! The listen address comes from `TINCT_ADDR` (default `127.0.0.1:3000`).

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use http::{Method, StatusCode};
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use serde::{Deserialize, Serialize};
use tinct::{Json, Request, Resource, Response, decode_request, encode_response};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Deserialize, Serialize)]
struct Note {
    text: String,
}

type Notes = Arc<Mutex<Vec<Note>>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let addr: SocketAddr = std::env::var("TINCT_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_owned())
        .parse()?;

    let notes = Notes::default();
    let list = {
        let notes = Arc::clone(&notes);
        move |_req: Request| {
            let snapshot = notes.lock().map(|n| n.clone()).unwrap_or_default();
            async move { Json(snapshot) }
        }
    };
    let create = {
        let notes = Arc::clone(&notes);
        move |mut req: Request| {
            let notes = Arc::clone(&notes);
            async move {
                let note: Note = match decode_request(&mut req).await {
                    Ok(note) => note,
                    Err(e) => {
                        return Response::builder()
                            .status(StatusCode::BAD_REQUEST)
                            .text(format!("{e}\n"));
                    }
                };
                if let Ok(mut all) = notes.lock() {
                    all.push(note.clone());
                }
                encode_response(StatusCode::CREATED, &note)
                    .unwrap_or_else(|_| Response::status(StatusCode::INTERNAL_SERVER_ERROR))
            }
        }
    };

    let resource = Arc::new(
        Resource::new()
            .on(Method::GET, list)
            .on(Method::POST, create),
    );

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, allow = %resource.allow(), "tinct demo listening");

    let mut tasks = tokio::task::JoinSet::new();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            _ = &mut shutdown => {
                info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                break;
            }

            res = listener.accept() => {
                let (stream, peer) = match res {
                    Ok(v) => v,
                    Err(e) => {
                        error!("accept error: {e}");
                        continue;
                    }
                };

                let resource = Arc::clone(&resource);
                tasks.spawn(async move {
                    let svc = service_fn(move |req: http::Request<hyper::body::Incoming>| {
                        // One path, one resource. Real routing belongs to a router.
                        let res = if req.uri().path() == "/notes" {
                            resource.dispatch(Request::new(req))
                        } else {
                            Resource::new().dispatch(Request::new(req))
                        };
                        async move { Ok::<_, Infallible>(res.await.into_http()) }
                    });

                    if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                        .serve_connection(TokioIo::new(stream), svc)
                        .await
                    {
                        error!(%peer, "connection error: {e}");
                    }
                });
            }

            Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
        }
    }

    while tasks.join_next().await.is_some() {}

    info!("tinct demo stopped");
    Ok(())
}
