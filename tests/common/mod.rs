#![allow(dead_code)]

use axum::{Router, extract::ConnectInfo};
use serde_json::json;
use session_gate::prelude::*;
use session_gate::routes::app_router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;
use tower_sessions::SessionStore;
use tower_sessions::cookie::time::{Duration, OffsetDateTime};
use tower_sessions::session::{Id, Record};

pub const CLIENT_ADDR: &str = "192.0.2.10:51234";

/// Inserts a fixed `ConnectInfo<SocketAddr>` the way `axum::serve` would.
#[derive(Clone)]
pub struct MockConnectInfoLayer(pub SocketAddr);

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService {
            inner,
            addr: self.0,
        }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
    addr: SocketAddr,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        req.extensions_mut().insert(ConnectInfo(self.addr));
        self.inner.call(req)
    }
}

pub fn create_test_state() -> (AppState, MemoryStore) {
    let store = MemoryStore::new();
    let state = AppState::new(
        Arc::new(SessionBackend::Memory(store.clone())),
        SessionSettings::default(),
    );
    (state, store)
}

/// Full application router as served, with a fixed client address.
pub fn create_test_app() -> (Router, MemoryStore) {
    let (state, store) = create_test_state();
    let app = app_router(state, store.clone())
        .layer(MockConnectInfoLayer(CLIENT_ADDR.parse().unwrap()));
    (app, store)
}

/// Creates a session that is already logged in and returns its cookie header.
pub async fn logged_in_cookie(store: &MemoryStore, user: &str) -> (Id, String) {
    let mut record = Record {
        id: Id::default(),
        data: Default::default(),
        expiry_date: OffsetDateTime::now_utc() + Duration::hours(1),
    };
    record.data.insert("user".to_string(), json!(user));
    store.create(&mut record).await.unwrap();

    let cookie = format!("session_id={}", record.id);
    (record.id, cookie)
}

/// Extracts `session_id=<id>` from a `Set-Cookie` header value.
pub fn session_cookie_from(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .expect("Set-Cookie has a name=value pair")
        .trim()
        .to_string()
}

/// Session id carried by a `session_id=<id>` cookie pair.
pub fn session_id_of(cookie: &str) -> Id {
    cookie
        .trim_start_matches("session_id=")
        .parse()
        .expect("cookie carries a session id")
}

/// Loads a session record straight from the store.
pub async fn load_session(store: &MemoryStore, cookie: &str) -> Option<Record> {
    store.load(&session_id_of(cookie)).await.unwrap()
}
