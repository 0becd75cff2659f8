//! Inventory domain module.
//!
//! Holds the reconciliation arithmetic for inventory counts, implemented as
//! deterministic domain logic (no IO, no HTTP, no storage). Every place the
//! dashboard shows reconciliation figures goes through [`reconcile`].

pub mod count;
pub mod line_item;
pub mod reconciliation;

pub use count::{CountedProduct, InventoryCount, ProductRef, ReconciledRow};
pub use line_item::{InventoryLineItem, MAX_UNIT_COST};
pub use reconciliation::{reconcile, Discrepancy, Reconciliation, ReconciliationTotals};
