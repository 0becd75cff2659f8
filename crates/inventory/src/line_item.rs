use rust_decimal::Decimal;
use serde::Serialize;

use stockdesk_core::{DomainError, DomainResult, ValueObject};

/// Largest accepted unit cost.
///
/// Keeps `deficit * unit_cost` (at most `u32::MAX` units) and the sum of
/// `u32::MAX` such rows well inside the `Decimal` range.
pub const MAX_UNIT_COST: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Raw figures for one product within one inventory count.
///
/// Quantities are unsigned so a negative stock level cannot be represented;
/// the unit cost is checked against `0..=MAX_UNIT_COST` at construction.
/// Callers normalise absent quantities to `0` before building a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryLineItem {
    on_hand_quantity: u32,
    reserved_quantity: u32,
    counted_quantity: u32,
    unit_cost: Decimal,
}

impl InventoryLineItem {
    pub fn new(
        on_hand_quantity: u32,
        reserved_quantity: u32,
        counted_quantity: u32,
        unit_cost: Decimal,
    ) -> DomainResult<Self> {
        if unit_cost.is_sign_negative() && !unit_cost.is_zero() {
            return Err(DomainError::validation(format!(
                "unit cost cannot be negative (got {unit_cost})"
            )));
        }
        if unit_cost > MAX_UNIT_COST {
            return Err(DomainError::validation(format!(
                "unit cost {unit_cost} exceeds {MAX_UNIT_COST}"
            )));
        }

        Ok(Self {
            on_hand_quantity,
            reserved_quantity,
            counted_quantity,
            unit_cost,
        })
    }

    /// Quantity recorded in the warehouse system at count time.
    pub fn on_hand_quantity(&self) -> u32 {
        self.on_hand_quantity
    }

    /// Quantity already committed to orders.
    pub fn reserved_quantity(&self) -> u32 {
        self.reserved_quantity
    }

    /// Quantity physically counted.
    pub fn counted_quantity(&self) -> u32 {
        self.counted_quantity
    }

    pub fn unit_cost(&self) -> Decimal {
        self.unit_cost
    }
}

impl ValueObject for InventoryLineItem {}
