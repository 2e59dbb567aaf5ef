//! Loopback stand-in for the newsdata.io endpoint used by unit tests.
//!
//! [`Upstream::spawn`] serves a canned reply on an ephemeral port and records
//! the query string of every request it receives.

use axum::{
    Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

const NEWS_PATH: &str = "/api/1/news";

/// The canned reply an [`Upstream`] returns for every request.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    status: u16,
    content_type: &'static str,
    body: String,
}

impl UpstreamReply {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/html",
            body: body.to_string(),
        }
    }
}

#[derive(Clone)]
struct UpstreamState {
    reply: Arc<UpstreamReply>,
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

/// A running mock server. Aborted on drop.
pub struct Upstream {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
    handle: JoinHandle<()>,
}

impl Upstream {
    pub async fn spawn(reply: UpstreamReply) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = UpstreamState {
            reply: Arc::new(reply),
            requests: Arc::clone(&requests),
        };
        let app = Router::new()
            .route(NEWS_PATH, get(serve_reply))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            requests,
            handle,
        }
    }

    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}{}", self.addr, NEWS_PATH)).unwrap()
    }

    /// Query parameters of every request received so far, in order.
    pub fn requests(&self) -> Vec<HashMap<String, String>> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for Upstream {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve_reply(
    State(state): State<UpstreamState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.requests.lock().unwrap().push(query);
    let reply = &state.reply;
    let status = StatusCode::from_u16(reply.status).unwrap();
    (
        status,
        [(header::CONTENT_TYPE, reply.content_type)],
        reply.body.clone(),
    )
        .into_response()
}

/// An HTTP client that talks to loopback directly, ignoring proxy env vars.
pub fn direct_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// A URL on loopback that nothing is listening on.
pub async fn closed_port_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{}{}", addr, NEWS_PATH)).unwrap()
}
