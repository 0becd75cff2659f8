//! Inventory reconciliation arithmetic.
//!
//! Derives expected-vs-counted figures for one line item. All derived values
//! are signed and never clamped: a negative figure is a valid reading
//! (over-reservation, surplus), not an error.
//!
//! Sign convention: a positive `deficit` is a shortage (fewer units found than
//! expected), a negative `deficit` is a surplus. `deficit_cost` carries the
//! sign of `deficit`.

use std::iter::Sum;

use rust_decimal::Decimal;
use serde::Serialize;

use stockdesk_core::ValueObject;

use crate::line_item::InventoryLineItem;

/// Direction of the gap between expected and counted stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Discrepancy {
    /// Fewer units counted than expected.
    Shortage,
    /// More units counted than expected.
    Surplus,
    Balanced,
}

impl Discrepancy {
    pub fn from_deficit(deficit: i64) -> Self {
        match deficit.signum() {
            1 => Discrepancy::Shortage,
            -1 => Discrepancy::Surplus,
            _ => Discrepancy::Balanced,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Discrepancy::Shortage => "shortage",
            Discrepancy::Surplus => "surplus",
            Discrepancy::Balanced => "balanced",
        }
    }
}

/// Derived figures for one line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    #[serde(skip)]
    line: InventoryLineItem,
    /// `on_hand - reserved`
    pub available_before_count: i64,
    /// `counted - reserved`
    pub net_counted: i64,
    /// `on_hand - counted`
    pub inventory_before_reserved_exit: i64,
    /// `available_before_count - counted`
    pub inventory_after_reserved_exit: i64,
    /// `available_before_count - net_counted`
    pub deficit: i64,
    /// `deficit * unit_cost`
    pub deficit_cost: Decimal,
}

impl Reconciliation {
    /// The line item these figures were derived from.
    pub fn line(&self) -> &InventoryLineItem {
        &self.line
    }

    pub fn discrepancy(&self) -> Discrepancy {
        Discrepancy::from_deficit(self.deficit)
    }
}

impl ValueObject for Reconciliation {}

/// Derive the reconciliation figures for one line item.
///
/// `deficit` is computed as `available_before_count - net_counted`, which
/// reduces to `on_hand - counted`: the reserved quantity shows up in the
/// intermediate columns but cancels out of the shortage figure.
pub fn reconcile(line: &InventoryLineItem) -> Reconciliation {
    let on_hand = i64::from(line.on_hand_quantity());
    let reserved = i64::from(line.reserved_quantity());
    let counted = i64::from(line.counted_quantity());

    let available_before_count = on_hand - reserved;
    let net_counted = counted - reserved;
    let deficit = available_before_count - net_counted;

    Reconciliation {
        line: *line,
        available_before_count,
        net_counted,
        inventory_before_reserved_exit: on_hand - counted,
        inventory_after_reserved_exit: available_before_count - counted,
        deficit,
        // |deficit| <= u32::MAX and unit_cost <= MAX_UNIT_COST, so this fits.
        deficit_cost: Decimal::from(deficit) * line.unit_cost(),
    }
}

/// Column totals for a set of reconciled line items.
///
/// Every derived total is the sum of the per-row figures, never a
/// re-derivation from summed raw quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationTotals {
    pub line_count: usize,
    pub on_hand_quantity: i64,
    pub reserved_quantity: i64,
    pub counted_quantity: i64,
    pub available_before_count: i64,
    pub net_counted: i64,
    pub inventory_before_reserved_exit: i64,
    pub inventory_after_reserved_exit: i64,
    pub deficit: i64,
    pub deficit_cost: Decimal,
}

impl ReconciliationTotals {
    pub fn add(&mut self, row: &Reconciliation) {
        self.line_count += 1;
        self.on_hand_quantity += i64::from(row.line.on_hand_quantity());
        self.reserved_quantity += i64::from(row.line.reserved_quantity());
        self.counted_quantity += i64::from(row.line.counted_quantity());
        self.available_before_count += row.available_before_count;
        self.net_counted += row.net_counted;
        self.inventory_before_reserved_exit += row.inventory_before_reserved_exit;
        self.inventory_after_reserved_exit += row.inventory_after_reserved_exit;
        self.deficit += row.deficit;
        self.deficit_cost += row.deficit_cost;
    }

    pub fn discrepancy(&self) -> Discrepancy {
        Discrepancy::from_deficit(self.deficit)
    }
}

impl<'a> Extend<&'a Reconciliation> for ReconciliationTotals {
    fn extend<I: IntoIterator<Item = &'a Reconciliation>>(&mut self, iter: I) {
        for row in iter {
            self.add(row);
        }
    }
}

impl Extend<Reconciliation> for ReconciliationTotals {
    fn extend<I: IntoIterator<Item = Reconciliation>>(&mut self, iter: I) {
        for row in iter {
            self.add(&row);
        }
    }
}

impl<'a> Sum<&'a Reconciliation> for ReconciliationTotals {
    fn sum<I: Iterator<Item = &'a Reconciliation>>(iter: I) -> Self {
        let mut totals = Self::default();
        totals.extend(iter);
        totals
    }
}

impl Sum<Reconciliation> for ReconciliationTotals {
    fn sum<I: Iterator<Item = Reconciliation>>(iter: I) -> Self {
        let mut totals = Self::default();
        totals.extend(iter);
        totals
    }
}
