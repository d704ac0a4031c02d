use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, Uri, header};
use axum_extra::headers::authorization::Basic;
use axum_extra::headers::{Authorization, HeaderMapExt};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::admin::{AdminPortal, Credentials};
use crate::protocol::{HandlerFactory, Reply, Request, Route};
use crate::store::PlayerStore;

/// Shared by every request task
#[derive(Clone)]
struct AppState {
    handlers: Arc<HandlerFactory>,
    store: Arc<PlayerStore>,
}

impl AppState {
    /// Route a raw request and run it against the store
    async fn process(&self, method: &Method, path: &str, headers: &HeaderMap, body: Bytes) -> Reply {
        let Route { operation, target } = match Route::resolve(method, path) {
            Ok(route) => route,
            Err(e) => {
                warn!("Rejected {} {}: {}", method, path, e);
                return Reply::error(&e);
            }
        };

        let mut request = Request::new(target).with_body(body);
        if let Some(content_type) = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
            request = request.with_content_type(content_type);
        }
        if let Some(auth) = headers.typed_get::<Authorization<Basic>>() {
            request = request.with_credentials(Credentials::new(auth.username(), auth.password()));
        }

        self.handlers.execute(operation, &request, &self.store).await
    }
}

/// Single entry point for every request; routing happens in `Route::resolve`
async fn handle_request(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Reply {
    state.process(&method, uri.path(), &headers, body).await
}

/// HTTP server
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    state: AppState,
}

impl Server {
    /// Create and bind HTTP server to specified address
    pub async fn bind(addr: &str, admin: AdminPortal) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        info!("HTTP server bound to {}", local_addr);

        let state = AppState {
            handlers: Arc::new(HandlerFactory::init(admin)),
            store: Arc::new(PlayerStore::new()),
        };

        Ok(Self {
            listener,
            local_addr,
            state,
        })
    }

    /// Get local listening address
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Start server, accept and process requests until the process exits
    pub async fn run(self) -> std::io::Result<()> {
        info!("Server started, listening on http://{}", self.local_addr);

        let router = Router::new()
            .fallback(handle_request)
            .with_state(self.state)
            .layer(TraceLayer::new_for_http());

        axum::serve(self.listener, router).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};
    use reqwest::redirect::Policy;
    use serde_json::{Value, json};

    const PASSWORD: &str = "hunter2";

    async fn bind_local() -> Server {
        Server::bind("127.0.0.1:0", AdminPortal::new(PASSWORD)).await.unwrap()
    }

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    #[tokio::test]
    async fn test_process_reads_content_type() {
        let server = bind_local().await;
        let state = &server.state;
        let body = Bytes::from_static(br#"{"text":"Ada"}"#);

        let reply = state.process(&Method::POST, "/players", &HeaderMap::new(), body.clone()).await;
        assert_eq!(reply.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let reply = state.process(&Method::POST, "/players", &json_headers(), body).await;
        assert_eq!(reply.status, StatusCode::CREATED);
        assert_eq!(state.store.len(), 1);
    }

    #[tokio::test]
    async fn test_process_reads_basic_auth() {
        let server = bind_local().await;
        let state = &server.state;

        let reply = state.process(&Method::GET, "/admin/", &HeaderMap::new(), Bytes::new()).await;
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED);

        let mut headers = HeaderMap::new();
        // admin:hunter2
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic YWRtaW46aHVudGVyMg=="));
        let reply = state.process(&Method::GET, "/admin/", &headers, Bytes::new()).await;
        assert_eq!(reply.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_process_rejects_before_touching_store() {
        let server = bind_local().await;
        let state = &server.state;

        let reply = state.process(&Method::PUT, "/player/", &json_headers(), Bytes::new()).await;
        assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED);

        let reply = state.process(&Method::GET, "/nowhere", &HeaderMap::new(), Bytes::new()).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
        assert_eq!(state.store.len(), 0);
    }

    #[tokio::test]
    async fn test_http_end_to_end() {
        let server = bind_local().await;
        let base = format!("http://{}", server.local_addr());
        tokio::spawn(server.run());

        let client = reqwest::Client::builder().redirect(Policy::none()).build().unwrap();

        // Empty store
        let resp = client.get(format!("{}/players/random", base)).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = client
            .post(format!("{}/player/", base))
            .header(header::CONTENT_TYPE, "application/json")
            .body(r#"{"text":"Ada","tags":["admin","core"]}"#)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = resp.json().await.unwrap();
        let id = created["id"].as_u64().unwrap();

        let resp = client.get(format!("{}/player/{}", base, id)).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let player: Value = resp.json().await.unwrap();
        assert_eq!(player["text"], "Ada");
        assert_eq!(player["tags"], json!(["admin", "core"]));

        let resp = client
            .post(format!("{}/player/", base))
            .header(header::CONTENT_TYPE, "text/plain")
            .body(r#"{"text":"Ada","tags":["admin","core"]}"#)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let resp = client.get(format!("{}/players", base)).send().await.unwrap();
        let all: Vec<Value> = resp.json().await.unwrap();
        assert_eq!(all.len(), 1);

        let resp = client.get(format!("{}/tag/core", base)).send().await.unwrap();
        let tagged: Vec<Value> = resp.json().await.unwrap();
        assert_eq!(tagged.len(), 1);

        let resp = client.get(format!("{}/players/random", base)).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers()[header::LOCATION], format!("/players/{}", id).as_str());

        let resp = client.delete(format!("{}/player/999999", base)).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = client.get(format!("{}/player/abc", base)).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = client.delete(format!("{}/player/{}", base, id)).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let resp = client.get(format!("{}/player/{}", base, id)).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = client
            .get(format!("{}/admin/", base))
            .basic_auth("admin", Some(PASSWORD))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
