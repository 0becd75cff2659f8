//! `stockdesk` command-line front end.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use stockdesk_client::{
    write_reconciliation_csv, ApiClient, AppStore, ClientConfig, InventoryDetailView,
    InventoryListView, InventoryQuery, LoadState, Tone,
};
use stockdesk_core::InventoryId;

#[derive(Debug, Parser)]
#[command(name = "stockdesk", about = "Inventory dashboard client")]
struct Args {
    /// Backend base URL (overrides STOCKDESK_API_URL).
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the reconciliation table of one inventory count.
    Show {
        inventory_id: String,

        /// Also export the table as CSV.
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// List inventory counts.
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long)]
        limit: Option<u32>,

        #[arg(long)]
        search: Option<String>,
    },
    /// Refresh and print the unread-message counter.
    Unread,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    stockdesk_observability::init();

    let args = Args::parse();

    let mut config = ClientConfig::from_env().context("invalid client configuration")?;
    if let Some(api_url) = &args.api_url {
        let mut overridden = ClientConfig::new(api_url)
            .context("invalid --api-url")?
            .with_timeout(config.timeout())
            .with_page_size(config.page_size());
        if let Some(token) = config.token() {
            overridden = overridden.with_token(token);
        }
        config = overridden;
    }

    tracing::info!(api_url = %config.api_url(), "starting stockdesk");
    let api = ApiClient::new(config).context("failed to build HTTP client")?;

    match args.command {
        Command::Show { inventory_id, csv } => show(&api, &inventory_id, csv).await,
        Command::List { page, limit, search } => {
            let limit = limit.unwrap_or(api.config().page_size());
            let mut query = InventoryQuery::first_page(limit).with_page(page);
            if let Some(term) = search {
                query = query.with_search(term);
            }
            list(&api, query).await
        }
        Command::Unread => {
            let store = AppStore::new();
            let count = store
                .refresh_unread(&api)
                .await
                .context("failed to fetch unread messages")?;
            println!("unread messages: {count}");
            Ok(())
        }
    }
}

fn tone_marker(tone: Tone) -> &'static str {
    match tone {
        Tone::Danger => "shortage",
        Tone::Success => "surplus",
        Tone::Neutral => "",
    }
}

async fn show(api: &ApiClient, raw_id: &str, csv: Option<PathBuf>) -> Result<()> {
    let id: InventoryId = raw_id.parse().context("invalid inventory id")?;
    let view = InventoryDetailView::load(api, &id).await;

    let count = match view.state() {
        LoadState::Loaded(count) => count,
        LoadState::Failed(msg) => bail!("{msg}"),
        LoadState::Loading => bail!("inventory still loading"),
    };

    println!("{} ({})", count.name, count.id);
    if let Some(warehouse) = &count.warehouse {
        println!("warehouse: {warehouse}");
    }
    println!();
    println!(
        "{:<28} {:>8} {:>8} {:>8} {:>9} {:>8} {:>8} {:>8} {:>8} {:>12}  ",
        "product", "on hand", "reserved", "counted", "available", "net", "before", "after",
        "deficit", "cost"
    );

    for row in view.rows() {
        println!(
            "{:<28} {:>8} {:>8} {:>8} {:>9} {:>8} {:>8} {:>8} {:>8} {:>12}  {}",
            row.product,
            row.on_hand_quantity,
            row.reserved_quantity,
            row.counted_quantity,
            row.available_before_count,
            row.net_counted,
            row.inventory_before_reserved_exit,
            row.inventory_after_reserved_exit,
            row.deficit,
            row.deficit_cost,
            tone_marker(row.tone),
        );
    }

    if let Some(totals) = view.totals() {
        println!(
            "{:<28} {:>8} {:>8} {:>8} {:>9} {:>8} {:>8} {:>8} {:>8} {:>12}  {}",
            "TOTAL",
            totals.on_hand_quantity,
            totals.reserved_quantity,
            totals.counted_quantity,
            totals.available_before_count,
            totals.net_counted,
            totals.inventory_before_reserved_exit,
            totals.inventory_after_reserved_exit,
            totals.deficit,
            totals.deficit_cost,
            tone_marker(view.totals_tone()),
        );
    }

    if let Some(path) = csv {
        let file = File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        write_reconciliation_csv(count, BufWriter::new(file))
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!();
        println!("exported to {}", path.display());
    }

    Ok(())
}

async fn list(api: &ApiClient, query: InventoryQuery) -> Result<()> {
    let mut view = InventoryListView::with_query(query);
    view.load(api).await;

    let page = match view.state() {
        LoadState::Loaded(page) => page,
        LoadState::Failed(msg) => bail!("{msg}"),
        LoadState::Loading => bail!("inventories still loading"),
    };

    for item in &page.items {
        println!(
            "{:<26} {:<30} {:<20} {:<12} {:>5}",
            item.id,
            item.name,
            item.warehouse.as_deref().unwrap_or("-"),
            item.status.as_deref().unwrap_or("-"),
            item.item_count,
        );
    }

    match page.total_pages {
        Some(total_pages) => println!("page {} of {}", page.page, total_pages),
        None => println!("page {}", page.page),
    }

    Ok(())
}
