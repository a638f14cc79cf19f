//! HTTP client for the remote orders API.
//!
//! Every public call issues exactly one GET. Failures are logged where they
//! happen and returned to the caller; nothing is retried or cached.

use std::sync::Arc;

use order_desk_core::OrderId;
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use crate::config::ApiConfig;
use crate::error::FetchError;
use crate::params::FetchParams;
use crate::types::Order;

/// Header carrying the static API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Orders API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct OrdersClient {
    inner: Arc<OrdersClientInner>,
}

struct OrdersClientInner {
    client: reqwest::Client,
    orders_url: Url,
}

impl OrdersClient {
    /// Create a new orders API client.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidApiKey` if the key is not a valid header
    /// value, or `FetchError::Http` if the HTTP client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();

        let mut api_key = HeaderValue::from_str(config.api_key.expose_secret())
            .map_err(|e| FetchError::InvalidApiKey(e.to_string()))?;
        api_key.set_sensitive(true);
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            inner: Arc::new(OrdersClientInner {
                client: builder.build()?,
                orders_url: config.orders_url(),
            }),
        })
    }

    /// URL a list fetch with `params` would request.
    #[must_use]
    pub fn list_url(&self, params: &FetchParams) -> Url {
        let mut url = self.inner.orders_url.clone();
        params.apply_to(&mut url);
        url
    }

    /// URL of a single order.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` if the URL cannot be built.
    pub fn order_url(&self, id: OrderId) -> Result<Url, FetchError> {
        Ok(Url::parse(&format!("{}/{id}", self.inner.orders_url))?)
    }

    /// Fetch a page of orders.
    ///
    /// Orders are returned in the order the server sent them.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` on network failures, `FetchError::Api` /
    /// `Unauthorized` / `NotFound` on non-2xx responses, and
    /// `FetchError::Parse` if the body is not a JSON array of orders.
    #[instrument(skip(self))]
    pub async fn fetch_orders(&self, params: &FetchParams) -> Result<Vec<Order>, FetchError> {
        let url = self.list_url(params);
        tracing::debug!(%url, "Fetching orders");

        match self.get::<Vec<Order>>(url).await {
            Ok(orders) => {
                tracing::debug!(count = orders.len(), "Fetched orders");
                Ok(orders)
            }
            Err(e) => {
                tracing::error!("Failed to fetch orders: {e}");
                Err(e)
            }
        }
    }

    /// Fetch a single order by ID.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::NotFound` if the order does not exist, otherwise
    /// the same errors as [`OrdersClient::fetch_orders`].
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn fetch_order(&self, id: OrderId) -> Result<Order, FetchError> {
        let result = match self.order_url(id) {
            Ok(url) => self.get(url).await,
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            tracing::error!("Failed to fetch order {id}: {e}");
        }
        result
    }

    /// Execute a GET request and decode the JSON body.
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let response = self.inner.client.get(url).send().await?;
        Self::handle_response(response).await
    }

    /// Handle API response and parse JSON.
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, FetchError> {
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            return serde_json::from_slice(&body)
                .map_err(|e| FetchError::Parse(format!("Failed to parse response: {e}")));
        }

        Err(Self::parse_error(response).await)
    }

    /// Map a non-success response to an error.
    async fn parse_error(response: reqwest::Response) -> FetchError {
        let status = response.status().as_u16();

        if status == 401 || status == 403 {
            return FetchError::Unauthorized { status };
        }

        if status == 404 {
            return FetchError::NotFound(response.url().path().to_string());
        }

        let message = response
            .text()
            .await
            .ok()
            .filter(|body| !body.is_empty())
            .unwrap_or_else(|| "Unknown error".to_string());

        FetchError::Api { status, message }
    }
}

impl std::fmt::Debug for OrdersClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrdersClient")
            .field("orders_url", &self.inner.orders_url.as_str())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::num::NonZeroU32;

    use order_desk_core::OrderStatus;

    use super::*;

    fn client() -> OrdersClient {
        let config = ApiConfig::new("https://shop.test/api", "k9F2mQ7xR4tL8vZ1pW6n").unwrap();
        OrdersClient::new(&config).unwrap()
    }

    #[test]
    fn test_list_url_without_params() {
        assert_eq!(
            client().list_url(&FetchParams::new()).as_str(),
            "https://shop.test/api/woocommerce/orders"
        );
    }

    #[test]
    fn test_list_url_with_params() {
        let params = FetchParams::new()
            .with_status(OrderStatus::Completed)
            .with_page(NonZeroU32::new(2).unwrap());

        assert_eq!(
            client().list_url(&params).as_str(),
            "https://shop.test/api/woocommerce/orders?status=completed&page=2"
        );
    }

    #[test]
    fn test_order_url() {
        assert_eq!(
            client().order_url(OrderId::new(727)).unwrap().as_str(),
            "https://shop.test/api/woocommerce/orders/727"
        );
    }

    #[test]
    fn test_rejects_api_key_with_newline() {
        let config = ApiConfig::new("https://shop.test", "bad\nkey").unwrap();
        let err = OrdersClient::new(&config).unwrap_err();
        assert!(matches!(err, FetchError::InvalidApiKey(_)));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let debug = format!("{:?}", client());
        assert!(debug.contains("shop.test"));
        assert!(!debug.contains("k9F2mQ7xR4tL8vZ1pW6n"));
    }
}
