//! Order status and status filter types.
//!
//! Wire values follow the WooCommerce REST API (`pending`, `on-hold`, ...).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Order lifecycle status.
///
/// The closed set of statuses the client filters on. Orders carry a
/// [`WireStatus`], which also keeps statuses outside this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    /// Awaiting payment.
    Pending,
    /// Payment received, awaiting fulfillment.
    Processing,
    /// Awaiting action (e.g. stock or payment confirmation).
    OnHold,
    /// Fulfilled and complete. Shown as "delivered" in metrics.
    Completed,
    /// Cancelled by an admin or the customer.
    Cancelled,
    /// Refunded by an admin.
    Refunded,
}

impl OrderStatus {
    /// All statuses that can be used as a filter.
    pub const FILTERABLE: [Self; 6] = [
        Self::Pending,
        Self::Processing,
        Self::OnHold,
        Self::Completed,
        Self::Cancelled,
        Self::Refunded,
    ];

    /// Wire value sent in the `status` query parameter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::OnHold => "on-hold",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::OnHold => "On Hold",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Refunded => "Refunded",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a status or status filter fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid order status: {0} (expected any, pending, processing, on-hold, completed, cancelled or refunded)")]
pub struct StatusParseError(pub String);

impl std::str::FromStr for OrderStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::FILTERABLE
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| StatusParseError(s.to_owned()))
    }
}

/// Status of an order as reported by the remote API.
///
/// Statuses outside [`OrderStatus`] (`failed`, `checkout-draft`, `trash`, or
/// plugin-defined ones) are kept verbatim and serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireStatus {
    Known(OrderStatus),
    Other(String),
}

impl WireStatus {
    /// The status if it is one the client knows.
    #[must_use]
    pub const fn known(&self) -> Option<OrderStatus> {
        match self {
            Self::Known(status) => Some(*status),
            Self::Other(_) => None,
        }
    }

    /// Wire value exactly as received.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(status) => status.as_str(),
            Self::Other(raw) => raw,
        }
    }

    /// Human-readable label; unrecognized statuses show their raw value.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Known(status) => status.label(),
            Self::Other(raw) => raw,
        }
    }
}

impl From<OrderStatus> for WireStatus {
    fn from(status: OrderStatus) -> Self {
        Self::Known(status)
    }
}

impl PartialEq<OrderStatus> for WireStatus {
    fn eq(&self, other: &OrderStatus) -> bool {
        self.known() == Some(*other)
    }
}

impl std::fmt::Display for WireStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constraint on which orders a list request returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    /// No `status` parameter is sent; the server returns every status.
    #[default]
    Any,
    /// Only orders in this status.
    Only(OrderStatus),
}

impl StatusFilter {
    /// The status to send, or `None` for [`StatusFilter::Any`].
    #[must_use]
    pub const fn status(&self) -> Option<OrderStatus> {
        match self {
            Self::Any => None,
            Self::Only(status) => Some(*status),
        }
    }
}

impl From<OrderStatus> for StatusFilter {
    fn from(status: OrderStatus) -> Self {
        Self::Only(status)
    }
}

impl From<Option<OrderStatus>> for StatusFilter {
    fn from(status: Option<OrderStatus>) -> Self {
        status.map_or(Self::Any, Self::Only)
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Only(status) => status.fmt(f),
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "any" {
            return Ok(Self::Any);
        }
        s.parse().map(Self::Only)
    }
}
