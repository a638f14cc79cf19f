//! Plain-text rendering of orders and metrics.

use std::fmt::Write;

use order_desk_client::{Order, OrderMetrics};
use order_desk_core::Price;

/// Order row for list display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRowView {
    pub number: String,
    pub date: String,
    pub customer: String,
    pub status: String,
    pub items: String,
    pub total: String,
}

impl From<&Order> for OrderRowView {
    fn from(order: &Order) -> Self {
        Self {
            number: format!("#{}", order.display_number()),
            date: order
                .date_created
                .as_deref()
                .map(date_only)
                .unwrap_or_default()
                .to_string(),
            customer: order.customer_name().unwrap_or_else(|| "Guest".to_string()),
            status: order.status.label().to_string(),
            items: order.item_count().to_string(),
            total: format_total(order),
        }
    }
}

/// Display total with currency, or the raw string if it doesn't parse.
fn format_total(order: &Order) -> String {
    order
        .total_price()
        .map_or_else(|_| order.total.clone(), |price| price.display())
}

/// `2024-03-15T10:22:01` -> `2024-03-15`.
fn date_only(timestamp: &str) -> &str {
    timestamp.split_once('T').map_or(timestamp, |(date, _)| date)
}

const HEADERS: [&str; 6] = ["ORDER", "DATE", "CUSTOMER", "STATUS", "ITEMS", "TOTAL"];

/// Render a page of orders as an aligned table.
pub fn render_order_table(orders: &[Order]) -> String {
    if orders.is_empty() {
        return "No orders found.".to_string();
    }

    let rows: Vec<[String; 6]> = orders
        .iter()
        .map(OrderRowView::from)
        .map(|row| [row.number, row.date, row.customer, row.status, row.items, row.total])
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(str::to_string), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out.trim_end().to_string()
}

fn push_row(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}

/// Render a single order with its line items.
pub fn render_order_detail(order: &Order) -> String {
    let row = OrderRowView::from(order);
    let mut out = String::new();

    let _ = writeln!(out, "Order {}", row.number);
    let _ = writeln!(out, "Status:   {}", row.status);
    if !row.date.is_empty() {
        let _ = writeln!(out, "Date:     {}", order.date_created.as_deref().unwrap_or_default());
    }
    let _ = writeln!(out, "Customer: {}", row.customer);
    if let Some(billing) = &order.billing {
        if let Some(email) = billing.email.as_deref().filter(|e| !e.is_empty()) {
            let _ = writeln!(out, "Email:    {email}");
        }
        if let Some(phone) = billing.phone.as_deref().filter(|p| !p.is_empty()) {
            let _ = writeln!(out, "Phone:    {phone}");
        }
    }
    if let Some(method) = order.payment_method_title.as_deref().filter(|m| !m.is_empty()) {
        let _ = writeln!(out, "Payment:  {method}");
    }

    let _ = writeln!(out);
    if order.line_items.is_empty() {
        let _ = writeln!(out, "No line items.");
    } else {
        let _ = writeln!(out, "Items:");
        for item in &order.line_items {
            let total = Price::parse(&item.total, order.currency.as_deref().unwrap_or_default())
                .map_or_else(|_| item.total.clone(), |price| price.display());
            let _ = writeln!(out, "  {} x {}  {total}", item.quantity, item.name);
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Total:    {}", row.total);

    if let Some(note) = order.customer_note.as_deref().filter(|n| !n.is_empty()) {
        let _ = writeln!(out, "Note:     {note}");
    }

    out.trim_end().to_string()
}

/// Render dashboard metrics.
pub fn render_metrics(metrics: &OrderMetrics) -> String {
    format!(
        "Pending:    {}\nProcessing: {}\nDelivered:  {}\nRevenue:    {:.2}",
        metrics.pending_orders,
        metrics.processing_orders,
        metrics.delivered_orders,
        metrics.total_revenue
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use serde_json::json;

    use super::*;

    fn order() -> Order {
        serde_json::from_value(json!({
            "id": 727,
            "number": "1727",
            "status": "on-hold",
            "currency": "EUR",
            "total": "18.00",
            "date_created": "2024-03-15T10:22:01",
            "billing": { "first_name": "Jane", "last_name": "Roe", "email": "jane@example.com" },
            "payment_method_title": "Direct Bank Transfer",
            "line_items": [
                { "id": 1, "name": "Hoodie", "quantity": 2, "total": "12.00" },
                { "id": 2, "name": "Cap", "quantity": 1, "total": "6.00" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_row_view() {
        let row = OrderRowView::from(&order());

        assert_eq!(row.number, "#1727");
        assert_eq!(row.date, "2024-03-15");
        assert_eq!(row.customer, "Jane Roe");
        assert_eq!(row.status, "On Hold");
        assert_eq!(row.items, "3");
        assert_eq!(row.total, "€18.00");
    }

    #[test]
    fn test_row_view_keeps_unparseable_total() {
        let mut order = order();
        order.total = "n/a".to_string();
        order.billing = None;

        let row = OrderRowView::from(&order);
        assert_eq!(row.total, "n/a");
        assert_eq!(row.customer, "Guest");
    }

    #[test]
    fn test_row_view_shows_unlisted_status_verbatim() {
        let mut order = order();
        order.status = serde_json::from_value(json!("checkout-draft")).unwrap();

        assert_eq!(OrderRowView::from(&order).status, "checkout-draft");
    }

    #[test]
    fn test_table_has_header_and_rows() {
        let table = render_order_table(&[order(), order()]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ORDER"));
        assert!(lines[1].contains("Jane Roe"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(render_order_table(&[]), "No orders found.");
    }

    #[test]
    fn test_detail_lists_items() {
        let detail = render_order_detail(&order());

        assert!(detail.starts_with("Order #1727"));
        assert!(detail.contains("2 x Hoodie  €12.00"));
        assert!(detail.contains("Payment:  Direct Bank Transfer"));
        assert!(detail.ends_with("Total:    €18.00"));
    }

    #[test]
    fn test_metrics_summary() {
        let metrics = OrderMetrics {
            pending_orders: 3,
            processing_orders: 5,
            delivered_orders: 2,
            total_revenue: 15.75,
        };

        assert_eq!(
            render_metrics(&metrics),
            "Pending:    3\nProcessing: 5\nDelivered:  2\nRevenue:    15.75"
        );
    }
}
