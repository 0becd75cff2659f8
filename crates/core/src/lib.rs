//! `stockdesk-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the inventory
//! model and the dashboard client (no I/O, no HTTP).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{InventoryId, ProductId};
pub use value_object::ValueObject;
