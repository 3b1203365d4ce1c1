//! Data models for the retail entities served by the remote data service.
//!
//! This module contains the records cached by the coordinator:
//!
//! - `Customer`, `Store`: identity plus contact/address fields
//! - `Department`, `Product`, `Promotion`: the catalog hierarchy
//!   (a promotion's department is derived through its product)
//! - `Inventory`: per-store stock levels with a composite identity
//! - `Order`, `Notification`: per-customer data, fetched fresh every time

pub mod customer;
pub mod department;
pub mod inventory;
pub mod notification;
pub mod order;
pub mod product;
pub mod promotion;
pub mod store;

pub use customer::Customer;
pub use department::Department;
pub use inventory::Inventory;
pub use notification::Notification;
pub use order::{Order, OrderItem};
pub use product::Product;
pub use promotion::Promotion;
pub use store::Store;

/// Uniform access to an entity's identity key, used by the generic cache.
pub trait Identified {
    type Id: Copy + Eq + std::hash::Hash;

    fn id(&self) -> Self::Id;
}
