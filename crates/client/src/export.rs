//! CSV export of the reconciliation table.

use std::io;

use thiserror::Error;

use stockdesk_inventory::InventoryCount;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub const HEADER: [&str; 12] = [
    "product",
    "sku",
    "on_hand",
    "reserved",
    "counted",
    "available_before_count",
    "net_counted",
    "inventory_before_reserved_exit",
    "inventory_after_reserved_exit",
    "deficit",
    "unit_cost",
    "deficit_cost",
];

/// Write one row per product followed by a `TOTAL` row.
pub fn write_reconciliation_csv<W: io::Write>(
    count: &InventoryCount,
    writer: W,
) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;

    for row in count.reconcile_rows() {
        let item = row.item();
        let r = &row.reconciliation;
        wtr.write_record([
            row.product.name.clone(),
            row.product.sku.clone().unwrap_or_default(),
            item.on_hand_quantity().to_string(),
            item.reserved_quantity().to_string(),
            item.counted_quantity().to_string(),
            r.available_before_count.to_string(),
            r.net_counted.to_string(),
            r.inventory_before_reserved_exit.to_string(),
            r.inventory_after_reserved_exit.to_string(),
            r.deficit.to_string(),
            item.unit_cost().to_string(),
            r.deficit_cost.to_string(),
        ])?;
    }

    let totals = count.totals();
    wtr.write_record([
        "TOTAL".to_string(),
        String::new(),
        totals.on_hand_quantity.to_string(),
        totals.reserved_quantity.to_string(),
        totals.counted_quantity.to_string(),
        totals.available_before_count.to_string(),
        totals.net_counted.to_string(),
        totals.inventory_before_reserved_exit.to_string(),
        totals.inventory_after_reserved_exit.to_string(),
        totals.deficit.to_string(),
        String::new(),
        totals.deficit_cost.to_string(),
    ])?;

    wtr.flush()?;
    tracing::debug!(inventory_id = %count.id, rows = totals.line_count, "reconciliation exported");
    Ok(())
}
