//! Order list and detail commands.

use std::num::NonZeroU32;

use order_desk_client::{FetchParams, OrdersClient};
use order_desk_core::{OrderId, StatusFilter};

use super::{CommandError, emit};
use crate::views;

/// Build list parameters from command-line flags.
pub fn list_params(
    status: StatusFilter,
    per_page: Option<NonZeroU32>,
    page: Option<NonZeroU32>,
) -> FetchParams {
    FetchParams {
        status,
        per_page,
        page,
    }
}

/// Print one page of orders.
pub async fn list(
    client: &OrdersClient,
    params: &FetchParams,
    json: bool,
) -> Result<(), CommandError> {
    let orders = client.fetch_orders(params).await?;

    if json {
        return emit(&serde_json::to_string_pretty(&orders)?);
    }

    tracing::info!("Fetched {} orders (status: {})", orders.len(), params.status);
    emit(&views::render_order_table(&orders))
}

/// Print a single order.
pub async fn show(client: &OrdersClient, id: OrderId, json: bool) -> Result<(), CommandError> {
    let order = client.fetch_order(id).await?;

    if json {
        return emit(&serde_json::to_string_pretty(&order)?);
    }

    emit(&views::render_order_detail(&order))
}
