//! Integration tests for Order Desk.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p order-desk-integration-tests
//! ```
//!
//! Tests run the real [`OrdersClient`] against [`MockOrdersApi`], an
//! in-process axum server that mimics the remote orders API and records
//! every request it receives. No network access or credentials are needed.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use axum::Router;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use order_desk_client::{ApiConfig, OrdersClient};
use serde_json::{Value, json};
use tokio::task::JoinHandle;

/// API key the mock accepts by default.
pub const TEST_API_KEY: &str = "k9F2mQ7xR4tL8vZ1pW6n";

/// Build a minimal order object as the remote API would send it.
#[must_use]
pub fn order_json(id: u64, status: &str, total: &str) -> Value {
    json!({
        "id": id,
        "number": id.to_string(),
        "status": status,
        "currency": "USD",
        "total": total,
        "line_items": [
            { "id": id * 10, "name": "Widget", "product_id": 1, "quantity": 1, "total": total }
        ]
    })
}

/// Build `count` orders with the given status and a fixed total.
#[must_use]
pub fn orders_json(first_id: u64, count: u64, status: &str, total: &str) -> Value {
    Value::Array(
        (first_id..first_id + count)
            .map(|id| order_json(id, status, total))
            .collect(),
    )
}

/// A canned response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    status: StatusCode,
    body: String,
    delay: Option<Duration>,
}

impl MockResponse {
    /// 200 with a JSON body.
    #[must_use]
    pub fn json(body: &Value) -> Self {
        Self::raw(StatusCode::OK, body.to_string())
    }

    /// Arbitrary status with a text body.
    #[must_use]
    pub fn raw(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: None,
        }
    }

    /// Non-success status with a WooCommerce-style error body.
    #[must_use]
    pub fn error(status: StatusCode) -> Self {
        let body = json!({
            "code": "mock_error",
            "message": status.canonical_reason().unwrap_or("error"),
            "data": { "status": status.as_u16() }
        });
        Self::raw(status, body.to_string())
    }

    /// Hold the response for `delay` before sending it.
    #[must_use]
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A request the mock received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Request path.
    pub path: String,
    /// Raw query string (`None` if the URL had no `?`).
    pub query: Option<String>,
    /// Value of the `x-api-key` header.
    pub api_key: Option<String>,
}

#[derive(Default)]
struct MockState {
    api_key: String,
    /// Keyed by the `status` query value; `None` is the unfiltered list.
    list_responses: HashMap<Option<String>, MockResponse>,
    order_responses: HashMap<u64, MockResponse>,
    requests: Mutex<Vec<RecordedRequest>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockState {
    fn record(&self, path: String, query: Option<String>, headers: &HeaderMap) {
        let api_key = headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);

        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                path,
                query,
                api_key,
            });
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|key| key == self.api_key)
    }

    async fn send(&self, response: Option<&MockResponse>, fallback: MockResponse) -> Response {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let response = response.cloned().unwrap_or(fallback);
        if let Some(delay) = response.delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        (
            response.status,
            [("content-type", "application/json")],
            response.body,
        )
            .into_response()
    }
}

/// Builder for [`MockOrdersApi`].
#[derive(Default)]
pub struct MockOrdersApiBuilder {
    state: MockState,
}

impl MockOrdersApiBuilder {
    /// Expect a different API key than [`TEST_API_KEY`].
    #[must_use]
    pub fn api_key(mut self, api_key: &str) -> Self {
        api_key.clone_into(&mut self.state.api_key);
        self
    }

    /// Response for `GET /woocommerce/orders` with `status=<status>`
    /// (`None` for requests without a status filter).
    #[must_use]
    pub fn list(mut self, status: Option<&str>, response: MockResponse) -> Self {
        self.state
            .list_responses
            .insert(status.map(ToOwned::to_owned), response);
        self
    }

    /// Response for `GET /woocommerce/orders/{id}`.
    #[must_use]
    pub fn order(mut self, id: u64, response: MockResponse) -> Self {
        self.state.order_responses.insert(id, response);
        self
    }

    /// Start serving on an ephemeral local port.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the listener cannot be bound.
    pub async fn start(mut self) -> std::io::Result<MockOrdersApi> {
        if self.state.api_key.is_empty() {
            TEST_API_KEY.clone_into(&mut self.state.api_key);
        }
        let state = Arc::new(self.state);

        let app = Router::new()
            .route("/woocommerce/orders", get(list_orders))
            .route("/woocommerce/orders/{id}", get(get_order))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(MockOrdersApi {
            addr,
            state,
            handle,
        })
    }
}

/// In-process stand-in for the remote orders API.
///
/// Unconfigured list requests get `200 []`; unconfigured single-order
/// requests get `404`. Requests without the expected API key get `401`.
pub struct MockOrdersApi {
    addr: SocketAddr,
    state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockOrdersApi {
    /// Start configuring a mock.
    #[must_use]
    pub fn builder() -> MockOrdersApiBuilder {
        MockOrdersApiBuilder::default()
    }

    /// Base URL to put in [`ApiConfig`].
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// A client configured for this mock with the expected API key.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn client(&self) -> OrdersClient {
        self.client_with_key(TEST_API_KEY)
    }

    /// A client configured for this mock with an arbitrary API key.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn client_with_key(&self, api_key: &str) -> OrdersClient {
        let config = ApiConfig::new(&self.base_url(), api_key).expect("valid mock base URL");
        OrdersClient::new(&config).expect("client builds")
    }

    /// Every request received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests received so far.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.requests().len()
    }

    /// Highest number of requests that were being served at the same time.
    #[must_use]
    pub fn max_in_flight(&self) -> usize {
        self.state.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Drop for MockOrdersApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// An address nothing is listening on, for connection-failure tests.
///
/// # Errors
///
/// Returns an I/O error if a temporary listener cannot be bound.
pub async fn unused_base_url() -> std::io::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}

async fn list_orders(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    state.record("/woocommerce/orders".to_string(), query.clone(), &headers);
    if !state.authorized(&headers) {
        return state
            .send(None, MockResponse::error(StatusCode::UNAUTHORIZED))
            .await;
    }

    let status = query.as_deref().and_then(|q| {
        url::form_urlencoded::parse(q.as_bytes())
            .find(|(key, _)| key == "status")
            .map(|(_, value)| value.into_owned())
    });

    state
        .send(
            state.list_responses.get(&status),
            MockResponse::json(&json!([])),
        )
        .await
}

async fn get_order(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    Path(id): Path<u64>,
) -> Response {
    state.record(format!("/woocommerce/orders/{id}"), query, &headers);
    if !state.authorized(&headers) {
        return state
            .send(None, MockResponse::error(StatusCode::UNAUTHORIZED))
            .await;
    }

    state
        .send(
            state.order_responses.get(&id),
            MockResponse::error(StatusCode::NOT_FOUND),
        )
        .await
}
