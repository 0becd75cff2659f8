//! View models for the inventory screens.
//!
//! Views fetch on mount and re-fetch on explicit user action; nothing is
//! merged with previously loaded data.

use rust_decimal::Decimal;
use serde::Serialize;

use stockdesk_core::InventoryId;
use stockdesk_inventory::{Discrepancy, InventoryCount, ReconciledRow, ReconciliationTotals};

use crate::api::{ApiClient, InventoryQuery};
use crate::wire::{InventorySummary, Page};

/// Message shown when a fetch fails. Details go to the log only.
pub const LOAD_FAILED: &str = "failed to load";

/// Lifecycle of data owned by a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn failed() -> Self {
        LoadState::Failed(LOAD_FAILED.to_string())
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// Display colour of a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Shortage (red).
    Danger,
    /// Surplus (green).
    Success,
    Neutral,
}

impl From<Discrepancy> for Tone {
    fn from(d: Discrepancy) -> Self {
        match d {
            Discrepancy::Shortage => Tone::Danger,
            Discrepancy::Surplus => Tone::Success,
            Discrepancy::Balanced => Tone::Neutral,
        }
    }
}

/// One display row of the reconciliation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailRow {
    pub product: String,
    pub sku: Option<String>,
    pub on_hand_quantity: u32,
    pub reserved_quantity: u32,
    pub counted_quantity: u32,
    pub unit_cost: Decimal,
    pub available_before_count: i64,
    pub net_counted: i64,
    pub inventory_before_reserved_exit: i64,
    pub inventory_after_reserved_exit: i64,
    pub deficit: i64,
    pub deficit_cost: Decimal,
    pub tone: Tone,
}

impl From<&ReconciledRow> for DetailRow {
    fn from(row: &ReconciledRow) -> Self {
        let r = &row.reconciliation;
        let item = row.item();
        Self {
            product: row.product.name.clone(),
            sku: row.product.sku.clone(),
            on_hand_quantity: item.on_hand_quantity(),
            reserved_quantity: item.reserved_quantity(),
            counted_quantity: item.counted_quantity(),
            unit_cost: item.unit_cost(),
            available_before_count: r.available_before_count,
            net_counted: r.net_counted,
            inventory_before_reserved_exit: r.inventory_before_reserved_exit,
            inventory_after_reserved_exit: r.inventory_after_reserved_exit,
            deficit: r.deficit,
            deficit_cost: r.deficit_cost,
            tone: r.discrepancy().into(),
        }
    }
}

/// Inventory detail screen: header, reconciliation table and totals.
#[derive(Debug, Clone)]
pub struct InventoryDetailView {
    state: LoadState<InventoryCount>,
    rows: Vec<DetailRow>,
    totals: Option<ReconciliationTotals>,
}

impl InventoryDetailView {
    pub fn loading() -> Self {
        Self::from_state(LoadState::Loading)
    }

    pub fn from_state(state: LoadState<InventoryCount>) -> Self {
        let (rows, totals): (Vec<DetailRow>, Option<ReconciliationTotals>) = match &state {
            LoadState::Loaded(count) => {
                let reconciled = count.reconcile_rows();
                let totals: ReconciliationTotals =
                    reconciled.iter().map(|r| &r.reconciliation).sum();
                (reconciled.iter().map(DetailRow::from).collect(), Some(totals))
            }
            _ => (Vec::new(), None),
        };

        Self { state, rows, totals }
    }

    /// Fetch the inventory and build the view. A failed fetch yields a view in
    /// the failed state with an empty table.
    pub async fn load(api: &ApiClient, id: &InventoryId) -> Self {
        let state = match api.get_inventory(id).await {
            Ok(count) => LoadState::Loaded(count),
            Err(err) => {
                tracing::error!(inventory_id = %id, error = %err, "failed to load inventory");
                LoadState::failed()
            }
        };
        Self::from_state(state)
    }

    pub fn state(&self) -> &LoadState<InventoryCount> {
        &self.state
    }

    pub fn inventory(&self) -> Option<&InventoryCount> {
        self.state.loaded()
    }

    pub fn rows(&self) -> &[DetailRow] {
        &self.rows
    }

    pub fn totals(&self) -> Option<&ReconciliationTotals> {
        self.totals.as_ref()
    }

    pub fn totals_tone(&self) -> Tone {
        self.totals
            .map(|t| t.discrepancy().into())
            .unwrap_or(Tone::Neutral)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Inventory listing screen with paging and search.
#[derive(Debug, Clone)]
pub struct InventoryListView {
    query: InventoryQuery,
    state: LoadState<Page<InventorySummary>>,
}

impl InventoryListView {
    pub fn new(page_size: u32) -> Self {
        Self {
            query: InventoryQuery::first_page(page_size),
            state: LoadState::Loading,
        }
    }

    pub fn with_query(query: InventoryQuery) -> Self {
        Self {
            query,
            state: LoadState::Loading,
        }
    }

    pub fn query(&self) -> &InventoryQuery {
        &self.query
    }

    pub fn state(&self) -> &LoadState<Page<InventorySummary>> {
        &self.state
    }

    pub fn items(&self) -> &[InventorySummary] {
        self.state
            .loaded()
            .map(|page| page.items.as_slice())
            .unwrap_or(&[])
    }

    /// (Re-)query the current page.
    pub async fn load(&mut self, api: &ApiClient) {
        self.state = LoadState::Loading;
        self.state = match api.list_inventories(&self.query).await {
            Ok(page) => LoadState::Loaded(page),
            Err(err) => {
                tracing::error!(error = %err, "failed to load inventories");
                LoadState::failed()
            }
        };
    }

    /// Change the search term and go back to the first page.
    pub async fn search(&mut self, api: &ApiClient, term: &str) {
        self.query = self.query.clone().with_search(term).with_page(1);
        self.load(api).await;
    }

    /// Move to the next page if there is one. Returns whether a fetch happened.
    pub async fn next_page(&mut self, api: &ApiClient) -> bool {
        let has_next = self.state.loaded().is_some_and(|p| p.has_next());
        if !has_next {
            return false;
        }
        self.query.page += 1;
        self.load(api).await;
        true
    }

    /// Move to the previous page if there is one. Returns whether a fetch happened.
    pub async fn previous_page(&mut self, api: &ApiClient) -> bool {
        if self.query.page <= 1 {
            return false;
        }
        self.query.page -= 1;
        self.load(api).await;
        true
    }
}
