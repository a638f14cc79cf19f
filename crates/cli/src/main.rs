//! Order Desk CLI - browse orders and dashboard metrics.
//!
//! # Usage
//!
//! ```bash
//! # List the newest orders (server default page size)
//! od-cli orders list
//!
//! # Pending orders, 25 per page, second page
//! od-cli orders list --status pending --per-page 25 --page 2
//!
//! # Show one order with its line items
//! od-cli orders show 727
//!
//! # Dashboard metrics (zeros on failure; --strict exits non-zero instead)
//! od-cli metrics --strict
//! ```
//!
//! # Environment Variables
//!
//! - `ORDERS_API_BASE_URL` - Base URL of the remote API
//! - `ORDERS_API_KEY` - Static API key
//! - `ORDERS_API_TIMEOUT_SECS` - Optional request timeout
//! - `RUST_LOG` - Log filter (default: `od_cli=info,order_desk_client=info`)
//! - `LOG_FORMAT` - Set to `json` for structured logs on stderr

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::num::NonZeroU32;

use clap::{Parser, Subcommand};
use order_desk_core::{OrderId, StatusFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod views;

#[derive(Parser)]
#[command(name = "od-cli")]
#[command(author, version, about = "Order Desk CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Show pending/processing/delivered counts and revenue
    Metrics {
        /// Exit with an error instead of printing zeros when a fetch fails
        #[arg(long)]
        strict: bool,

        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List one page of orders
    List {
        /// Status filter (`any`, `pending`, `processing`, `on-hold`, `completed`, `cancelled`, `refunded`)
        #[arg(short, long, default_value = "any")]
        status: StatusFilter,

        /// Page size (server default if omitted)
        #[arg(long)]
        per_page: Option<NonZeroU32>,

        /// Page number, starting at 1
        #[arg(short, long)]
        page: Option<NonZeroU32>,

        /// Print the raw orders as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one order with its line items
    Show {
        /// Order ID
        id: OrderId,

        /// Print the raw order as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "od_cli=info,order_desk_client=info".into());

    // Logs go to stderr so stdout stays clean for tables and JSON
    let is_json = std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json");
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!is_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let client = commands::client()?;

    match cli.command {
        Commands::Orders { action } => match action {
            OrdersAction::List {
                status,
                per_page,
                page,
                json,
            } => {
                let params = commands::orders::list_params(status, per_page, page);
                commands::orders::list(&client, &params, json).await?;
            }
            OrdersAction::Show { id, json } => {
                commands::orders::show(&client, id, json).await?;
            }
        },
        Commands::Metrics { strict, json } => {
            commands::metrics::show(&client, strict, json).await?;
        }
    }
    Ok(())
}
