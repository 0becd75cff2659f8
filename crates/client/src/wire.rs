//! Wire types for the backend REST API and their conversion into domain types.
//!
//! These types must not leak past the client: every response is decoded into
//! a DTO here and then converted (`TryFrom`) into fully-populated domain
//! values. Absent quantities and prices become `0`; values the domain cannot
//! represent (negative quantities, negative prices, empty ids) are rejected.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockdesk_core::{DomainError, DomainResult, InventoryId, ProductId};
use stockdesk_inventory::{InventoryCount, InventoryLineItem, ProductRef};

/// Display name used when the backend did not populate a product.
pub const UNKNOWN_PRODUCT: &str = "(unknown product)";

/// Some endpoints wrap their payload in `{ "data": ... }`, others return it bare.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(inner) => inner,
        }
    }
}

/// Reference that is either populated (an embedded object) or a bare id.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Populated<T> {
    Object(T),
    Id(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct WarehouseDto {
    #[serde(rename = "_id", alias = "id")]
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    #[serde(rename = "_id", alias = "id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub sku: Option<String>,
    /// On-hand quantity at count time.
    pub quantity: Option<u32>,
    /// Unit cost used to price shortages.
    pub price_before_discount: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemDto {
    pub product: Option<Populated<ProductDto>>,
    pub reserved_quantity: Option<u32>,
    pub counted_quantity: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryDto {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: Option<String>,
    pub warehouse: Option<Populated<WarehouseDto>>,
    pub status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub items: Option<Vec<InventoryItemDto>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummaryDto {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: Option<String>,
    pub warehouse: Option<Populated<WarehouseDto>>,
    pub status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub items: Option<Vec<serde_json::Value>>,
    pub item_count: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDto<T> {
    #[serde(alias = "data", alias = "docs", alias = "inventories")]
    pub items: Vec<T>,
    #[serde(alias = "currentPage")]
    pub page: Option<u32>,
    pub limit: Option<u32>,
    #[serde(alias = "totalDocs", alias = "totalItems")]
    pub total: Option<u64>,
    pub total_pages: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnreadCountDto {
    #[serde(alias = "unread", alias = "unreadCount")]
    pub count: u64,
}

/// One row of the inventory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventorySummary {
    pub id: InventoryId,
    pub name: String,
    pub warehouse: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub item_count: u32,
}

/// A page of listing results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: Option<u64>,
    pub total_pages: Option<u32>,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        match self.total_pages {
            Some(total_pages) => self.page < total_pages,
            // Without a page count, a full page suggests there may be more.
            None => self.items.len() as u64 >= u64::from(self.limit),
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

fn warehouse_name(warehouse: Option<Populated<WarehouseDto>>) -> Option<String> {
    match warehouse? {
        Populated::Object(w) => w.name.or(w.id),
        Populated::Id(id) => Some(id),
    }
}

fn product_id(raw: Option<String>) -> DomainResult<Option<ProductId>> {
    raw.map(ProductId::parse).transpose()
}

impl InventoryItemDto {
    /// Normalise one count-sheet line into a product reference and line item.
    pub fn into_line(self) -> DomainResult<(ProductRef, InventoryLineItem)> {
        let (product, on_hand, unit_cost) = match self.product {
            Some(Populated::Object(p)) => (
                ProductRef::new(
                    product_id(p.id)?,
                    p.name.unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
                    p.sku,
                ),
                p.quantity.unwrap_or(0),
                p.price_before_discount.unwrap_or(Decimal::ZERO),
            ),
            Some(Populated::Id(id)) => (
                ProductRef::new(Some(ProductId::parse(id)?), UNKNOWN_PRODUCT, None),
                0,
                Decimal::ZERO,
            ),
            None => (ProductRef::new(None, UNKNOWN_PRODUCT, None), 0, Decimal::ZERO),
        };

        let item = InventoryLineItem::new(
            on_hand,
            self.reserved_quantity.unwrap_or(0),
            self.counted_quantity.unwrap_or(0),
            unit_cost,
        )?;

        Ok((product, item))
    }
}

impl TryFrom<InventoryDto> for InventoryCount {
    type Error = DomainError;

    fn try_from(dto: InventoryDto) -> DomainResult<Self> {
        let id = InventoryId::parse(dto.id)?;
        let name = dto.name.unwrap_or_else(|| id.to_string());

        let mut count = InventoryCount::new(id, name);
        count.warehouse = warehouse_name(dto.warehouse);
        count.status = dto.status;
        count.created_at = dto.created_at;

        for item in dto.items.unwrap_or_default() {
            let (product, line) = item.into_line()?;
            count = count.with_product(product, line);
        }

        Ok(count)
    }
}

impl TryFrom<InventorySummaryDto> for InventorySummary {
    type Error = DomainError;

    fn try_from(dto: InventorySummaryDto) -> DomainResult<Self> {
        let id = InventoryId::parse(dto.id)?;
        let item_count = match (dto.item_count, &dto.items) {
            (Some(n), _) => n,
            (None, Some(items)) => u32::try_from(items.len())
                .map_err(|_| DomainError::validation("too many inventory items"))?,
            (None, None) => 0,
        };

        Ok(InventorySummary {
            name: dto.name.unwrap_or_else(|| id.to_string()),
            id,
            warehouse: warehouse_name(dto.warehouse),
            status: dto.status,
            created_at: dto.created_at,
            item_count,
        })
    }
}

impl<T> PageDto<T> {
    /// Convert into a domain page, falling back to the requested paging
    /// parameters when the backend omits them.
    pub fn into_page<U>(self, requested_page: u32, requested_limit: u32) -> DomainResult<Page<U>>
    where
        U: TryFrom<T, Error = DomainError>,
    {
        let limit = self.limit.filter(|l| *l > 0).unwrap_or(requested_limit);
        let total_pages = self.total_pages.or_else(|| {
            self.total
                .map(|total| u32::try_from(total.div_ceil(u64::from(limit.max(1)))).unwrap_or(u32::MAX))
        });

        let items = self
            .items
            .into_iter()
            .map(U::try_from)
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(Page {
            items,
            page: self.page.unwrap_or(requested_page),
            limit,
            total: self.total,
            total_pages,
        })
    }
}
