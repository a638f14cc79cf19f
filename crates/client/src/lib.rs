//! Order Desk Client - remote orders API access and dashboard metrics.
//!
//! Talks to a WooCommerce-compatible REST API that exposes
//! `GET {base_url}/woocommerce/orders` behind a static `x-api-key` header.
//!
//! # Architecture
//!
//! - [`OrdersClient`] performs exactly one GET per call; there is no caching,
//!   no retry, and no shared mutable state, so clones can be used freely
//!   across tasks.
//! - Metrics are derived client-side from three concurrent list fetches
//!   (pending, processing, completed).
//!
//! # Example
//!
//! ```rust,no_run
//! use order_desk_client::{ApiConfig, FetchParams, OrdersClient};
//! use order_desk_core::OrderStatus;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ApiConfig::from_env()?;
//! let client = OrdersClient::new(&config)?;
//!
//! let params = FetchParams::new().with_status(OrderStatus::Pending);
//! let orders = client.fetch_orders(&params).await?;
//!
//! let metrics = client.try_fetch_order_metrics().await?;
//! # let _ = (orders, metrics);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod params;
pub mod types;

pub use client::OrdersClient;
pub use config::{ApiConfig, ConfigError};
pub use error::FetchError;
pub use metrics::{MetricsError, OrderMetrics};
pub use params::FetchParams;
pub use types::{Billing, LineItem, Order};
