//! Dashboard metrics derived from three concurrent order fetches.
//!
//! Counts come from the pending, processing and completed lists (one page
//! each, server default page size). Revenue is the sum of the completed
//! orders' totals.
//!
//! Two entry points:
//! - [`OrdersClient::try_fetch_order_metrics`] reports failures as `Err`.
//! - [`OrdersClient::fetch_order_metrics`] never fails: errors are logged and
//!   a zeroed record is returned, so callers cannot tell "no orders" from
//!   "fetch failed". Prefer the `try_` variant when that matters.

use order_desk_core::{OrderId, OrderStatus};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::client::OrdersClient;
use crate::error::FetchError;
use crate::params::FetchParams;
use crate::types::Order;

/// Errors that can occur while computing order metrics.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// One of the underlying fetches failed.
    #[error("Failed to fetch orders: {0}")]
    Fetch(#[from] FetchError),

    /// A completed order's total is not a finite decimal number.
    #[error("Order {order_id} has a malformed total: {total:?}")]
    MalformedTotal { order_id: OrderId, total: String },
}

/// Order counts and revenue for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderMetrics {
    /// Number of pending orders.
    pub pending_orders: usize,
    /// Number of processing orders.
    pub processing_orders: usize,
    /// Number of completed ("delivered") orders.
    pub delivered_orders: usize,
    /// Sum of completed order totals.
    pub total_revenue: f64,
}

impl OrderMetrics {
    /// All-zero metrics.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            pending_orders: 0,
            processing_orders: 0,
            delivered_orders: 0,
            total_revenue: 0.0,
        }
    }

    /// Build metrics from the three status lists.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::MalformedTotal` if any completed order's total
    /// does not parse.
    pub fn from_orders(
        pending: &[Order],
        processing: &[Order],
        completed: &[Order],
    ) -> Result<Self, MetricsError> {
        Ok(Self {
            pending_orders: pending.len(),
            processing_orders: processing.len(),
            delivered_orders: completed.len(),
            total_revenue: total_revenue(completed)?,
        })
    }
}

/// Sum of order totals.
///
/// # Errors
///
/// Returns `MetricsError::MalformedTotal` for the first order whose total is
/// not a finite decimal number.
pub fn total_revenue(orders: &[Order]) -> Result<f64, MetricsError> {
    orders.iter().try_fold(0.0, |sum, order| {
        order
            .total_amount()
            .map(|amount| sum + amount)
            .ok_or_else(|| MetricsError::MalformedTotal {
                order_id: order.id,
                total: order.total.clone(),
            })
    })
}

impl OrdersClient {
    /// Fetch pending, processing and completed orders concurrently and
    /// derive metrics.
    ///
    /// All three requests are awaited together; if any fails, the whole
    /// aggregation fails.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::Fetch` if any fetch fails and
    /// `MetricsError::MalformedTotal` if a completed total does not parse.
    #[instrument(skip(self))]
    pub async fn try_fetch_order_metrics(&self) -> Result<OrderMetrics, MetricsError> {
        let pending = FetchParams::new().with_status(OrderStatus::Pending);
        let processing = FetchParams::new().with_status(OrderStatus::Processing);
        let completed = FetchParams::new().with_status(OrderStatus::Completed);

        let (pending, processing, completed) = tokio::try_join!(
            self.fetch_orders(&pending),
            self.fetch_orders(&processing),
            self.fetch_orders(&completed),
        )?;

        let metrics = OrderMetrics::from_orders(&pending, &processing, &completed)?;
        tracing::debug!(?metrics, "Computed order metrics");
        Ok(metrics)
    }

    /// Like [`OrdersClient::try_fetch_order_metrics`], but never fails.
    ///
    /// Any error is logged and [`OrderMetrics::zero`] is returned.
    pub async fn fetch_order_metrics(&self) -> OrderMetrics {
        match self.try_fetch_order_metrics().await {
            Ok(metrics) => metrics,
            Err(e) => {
                tracing::error!("Failed to fetch order metrics: {e}");
                OrderMetrics::zero()
            }
        }
    }
}
