//! Dashboard metrics command.

use order_desk_client::OrdersClient;

use super::{CommandError, emit};
use crate::views;

/// Print order metrics.
///
/// Without `strict`, a failed fetch prints zeros (and logs the error).
pub async fn show(client: &OrdersClient, strict: bool, json: bool) -> Result<(), CommandError> {
    let metrics = if strict {
        client.try_fetch_order_metrics().await?
    } else {
        client.fetch_order_metrics().await
    };

    if json {
        return emit(&serde_json::to_string_pretty(&metrics)?);
    }

    emit(&views::render_metrics(&metrics))
}
