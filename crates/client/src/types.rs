//! Order records as returned by the remote API.
//!
//! These are pass-through DTOs: the fields the client reads are typed, and
//! everything else lands in `extra` so re-serializing an order loses nothing.

use order_desk_core::{LineItemId, OrderId, Price, PriceError, ProductId, WireStatus};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Order Types
// =============================================================================

/// A single order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Order ID.
    pub id: OrderId,
    /// Display number (may differ from the ID with sequential-number plugins).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// Lifecycle status, verbatim.
    pub status: WireStatus,
    /// ISO 4217 currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Grand total as a decimal string (e.g., `"10.50"`).
    pub total: String,
    /// Creation time in the store's timezone (ISO 8601 without offset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<String>,
    /// Billing address and contact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing: Option<Billing>,
    /// Payment method shown to the customer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_title: Option<String>,
    /// Note left by the customer at checkout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_note: Option<String>,
    /// Line items in the order.
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    /// Every other field, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Order {
    /// Number to show to people: `number` if the API sent one, else the ID.
    #[must_use]
    pub fn display_number(&self) -> String {
        self.number
            .as_deref()
            .filter(|n| !n.is_empty())
            .map_or_else(|| self.id.to_string(), ToOwned::to_owned)
    }

    /// Total parsed as a float, for aggregation.
    ///
    /// Returns `None` when the string is not a finite decimal number
    /// (including `"NaN"` and `"inf"`, which `f64` parsing would accept).
    #[must_use]
    pub fn total_amount(&self) -> Option<f64> {
        self.total
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite())
    }

    /// Total as a [`Price`] in the order's currency, for display.
    ///
    /// # Errors
    ///
    /// Returns `PriceError` if the total is not a decimal number.
    pub fn total_price(&self) -> Result<Price, PriceError> {
        Price::parse(&self.total, self.currency.as_deref().unwrap_or_default())
    }

    /// Customer name from billing, falling back to the billing email.
    #[must_use]
    pub fn customer_name(&self) -> Option<String> {
        let billing = self.billing.as_ref()?;
        let name = [billing.first_name.as_deref(), billing.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if name.is_empty() {
            billing.email.clone().filter(|email| !email.is_empty())
        } else {
            Some(name)
        }
    }

    /// Total quantity across all line items.
    #[must_use]
    pub fn item_count(&self) -> i64 {
        self.line_items.iter().map(|item| item.quantity).sum()
    }
}

/// Billing address and contact details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Billing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A line item in an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Line item ID.
    pub id: LineItemId,
    /// Product name at time of purchase.
    #[serde(default)]
    pub name: String,
    /// Product ID (`None` or 0 if the product was deleted).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    /// Quantity ordered.
    #[serde(default)]
    pub quantity: i64,
    /// Line total as a decimal string.
    #[serde(default)]
    pub total: String,
    /// Every other field, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use order_desk_core::OrderStatus;
    use serde_json::json;

    use super::*;

    fn sample() -> Value {
        json!({
            "id": 727,
            "number": "727",
            "status": "processing",
            "currency": "USD",
            "total": "29.35",
            "date_created": "2024-03-15T10:22:01",
            "billing": {
                "first_name": "John",
                "last_name": "Doe",
                "email": "john.doe@example.com",
                "city": "San Francisco"
            },
            "line_items": [
                { "id": 315, "name": "Woo Single #1", "product_id": 93, "quantity": 2, "total": "6.00", "sku": "" },
                { "id": 316, "name": "Ship Your Idea", "product_id": 22, "quantity": 1, "total": "12.00" }
            ],
            "shipping_total": "10.00",
            "meta_data": []
        })
    }

    #[test]
    fn test_deserialize_known_fields() {
        let order: Order = serde_json::from_value(sample()).unwrap();

        assert_eq!(order.id, OrderId::new(727));
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.line_items.len(), 2);
        assert_eq!(order.line_items[0].product_id, Some(ProductId::new(93)));
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.customer_name().as_deref(), Some("John Doe"));
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let order: Order = serde_json::from_value(sample()).unwrap();

        assert_eq!(order.extra["shipping_total"], json!("10.00"));
        let billing = order.billing.as_ref().unwrap();
        assert_eq!(billing.extra["city"], json!("San Francisco"));

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value, sample());
    }

    #[test]
    fn test_unlisted_status_survives_round_trip() {
        let mut raw = sample();
        raw["status"] = json!("failed");

        let order: Order = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(order.status, WireStatus::Other("failed".to_string()));
        assert_eq!(order.status.known(), None);

        let back = serde_json::to_value(&order).unwrap();
        assert_eq!(back["status"], json!("failed"));
        assert_eq!(back, raw);
    }

    #[test]
    fn test_null_currency_is_accepted() {
        let mut raw = sample();
        raw["currency"] = Value::Null;

        let order: Order = serde_json::from_value(raw).unwrap();

        assert_eq!(order.currency, None);
        assert_eq!(order.total_price().unwrap().display(), "29.35");
    }

    #[test]
    fn test_minimal_order() {
        let order: Order = serde_json::from_value(json!({
            "id": 1,
            "status": "checkout-draft",
            "total": "0.00"
        }))
        .unwrap();

        assert_eq!(order.status.as_str(), "checkout-draft");
        assert_eq!(order.currency, None);
        assert!(order.line_items.is_empty());
        assert_eq!(order.display_number(), "1");
        assert_eq!(order.customer_name(), None);
    }

    #[test]
    fn test_total_amount() {
        let mut order: Order = serde_json::from_value(sample()).unwrap();
        assert!((order.total_amount().unwrap() - 29.35).abs() < f64::EPSILON);

        order.total = "abc".to_string();
        assert_eq!(order.total_amount(), None);

        order.total = "NaN".to_string();
        assert_eq!(order.total_amount(), None);
    }

    #[test]
    fn test_total_price_display() {
        let order: Order = serde_json::from_value(sample()).unwrap();
        assert_eq!(order.total_price().unwrap().display(), "$29.35");
    }

    #[test]
    fn test_customer_name_falls_back_to_email() {
        let mut order: Order = serde_json::from_value(sample()).unwrap();
        if let Some(billing) = order.billing.as_mut() {
            billing.first_name = Some(String::new());
            billing.last_name = None;
        }

        assert_eq!(order.customer_name().as_deref(), Some("john.doe@example.com"));
    }
}
