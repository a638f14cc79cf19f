//! Request-shaping parameters for order list fetches.

use std::num::NonZeroU32;

use order_desk_core::{OrderStatus, StatusFilter};
use url::Url;

/// Parameters for [`OrdersClient::fetch_orders`](crate::OrdersClient::fetch_orders).
///
/// Absent values are omitted from the query entirely, leaving the server's
/// defaults in effect. Page size and page number are positive by type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchParams {
    /// Status filter (`Any` sends no `status` parameter).
    pub status: StatusFilter,
    /// Page size (`per_page`).
    pub per_page: Option<NonZeroU32>,
    /// 1-based page number (`page`).
    pub page: Option<NonZeroU32>,
}

impl FetchParams {
    /// Parameters with nothing set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            status: StatusFilter::Any,
            per_page: None,
            page: None,
        }
    }

    /// Restrict to a status (or `StatusFilter::Any` to clear).
    #[must_use]
    pub fn with_status(mut self, status: impl Into<StatusFilter>) -> Self {
        self.status = status.into();
        self
    }

    /// Set the page size.
    #[must_use]
    pub const fn with_per_page(mut self, per_page: NonZeroU32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Set the page number.
    #[must_use]
    pub const fn with_page(mut self, page: NonZeroU32) -> Self {
        self.page = Some(page);
        self
    }

    /// The status to filter by, if any.
    #[must_use]
    pub const fn status(&self) -> Option<OrderStatus> {
        self.status.status()
    }

    /// Query pairs for the present parameters, in `status`, `per_page`, `page` order.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(status) = self.status() {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page", per_page.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        pairs
    }

    /// Append the present parameters to `url`.
    ///
    /// Leaves the URL untouched (no `?`) when nothing is set.
    pub fn apply_to(&self, url: &mut Url) {
        let pairs = self.query_pairs();
        if pairs.is_empty() {
            return;
        }

        let mut query = url.query_pairs_mut();
        for (key, value) in &pairs {
            query.append_pair(key, value);
        }
    }
}
