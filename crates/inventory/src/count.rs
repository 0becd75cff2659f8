//! Inventory count documents.

use chrono::{DateTime, Utc};
use serde::Serialize;

use stockdesk_core::{Entity, InventoryId, ProductId};

use crate::line_item::InventoryLineItem;
use crate::reconciliation::{reconcile, Discrepancy, Reconciliation, ReconciliationTotals};

/// Product reference as displayed on a count sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRef {
    /// `None` when the backend returned an unpopulated product reference.
    pub id: Option<ProductId>,
    pub name: String,
    pub sku: Option<String>,
}

impl ProductRef {
    pub fn new(id: Option<ProductId>, name: impl Into<String>, sku: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            sku,
        }
    }
}

/// One product line of an inventory count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountedProduct {
    pub product: ProductRef,
    pub item: InventoryLineItem,
}

/// A counted product paired with its derived figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciledRow {
    pub product: ProductRef,
    pub reconciliation: Reconciliation,
}

impl ReconciledRow {
    pub fn item(&self) -> &InventoryLineItem {
        self.reconciliation.line()
    }
}

/// One inventory exercise (count sheet) as fetched from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryCount {
    pub id: InventoryId,
    pub name: String,
    pub warehouse: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub products: Vec<CountedProduct>,
}

impl Entity for InventoryCount {
    type Id = InventoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl InventoryCount {
    pub fn new(id: InventoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            warehouse: None,
            status: None,
            created_at: None,
            products: Vec::new(),
        }
    }

    pub fn with_product(mut self, product: ProductRef, item: InventoryLineItem) -> Self {
        self.products.push(CountedProduct { product, item });
        self
    }

    /// Reconcile every product line, in document order.
    pub fn reconcile_rows(&self) -> Vec<ReconciledRow> {
        self.products
            .iter()
            .map(|p| ReconciledRow {
                product: p.product.clone(),
                reconciliation: reconcile(&p.item),
            })
            .collect()
    }

    pub fn totals(&self) -> ReconciliationTotals {
        self.products.iter().map(|p| reconcile(&p.item)).sum()
    }

    pub fn shortages(&self) -> Vec<ReconciledRow> {
        self.rows_with(Discrepancy::Shortage)
    }

    pub fn surpluses(&self) -> Vec<ReconciledRow> {
        self.rows_with(Discrepancy::Surplus)
    }

    fn rows_with(&self, discrepancy: Discrepancy) -> Vec<ReconciledRow> {
        self.reconcile_rows()
            .into_iter()
            .filter(|row| row.reconciliation.discrepancy() == discrepancy)
            .collect()
    }
}
