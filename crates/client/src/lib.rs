//! `stockdesk-client`
//!
//! **Responsibility:** dashboard client for the StockDesk backend.
//!
//! This crate provides:
//! - A typed REST client with a parse-don't-validate wire boundary
//! - View models for the inventory listing and detail screens
//! - CSV export of reconciliation tables
//! - The application store (unread-message counter)
//!
//! The client is a **thin shell** around the backend API; it never writes
//! business state and never merges local and remote data.

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod store;
pub mod views;
pub mod wire;

pub use api::{ApiClient, InventoryQuery};
pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
pub use export::{write_reconciliation_csv, ExportError};
pub use store::{AppStore, UnreadCounter, UnreadSubscription};
pub use views::{DetailRow, InventoryDetailView, InventoryListView, LoadState, Tone};
pub use wire::{InventorySummary, Page};
