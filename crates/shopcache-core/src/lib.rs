//! shopcache-core - a client-side cache for a remote retail data service.
//!
//! The crate sits between UI consumers and the remote service: each entity
//! collection (customers, departments, products, promotions, stores,
//! inventory) is fetched at most once, cached in memory for the process
//! lifetime, and served synchronously from cache to every later caller.
//! [`DataProvider`] is the single access point; it owns the per-entity
//! caches, decides when to fetch, and chains cache-population prerequisites
//! for derived queries such as promotions filtered by department.
//!
//! Per-customer data (orders, notifications) is always fetched fresh and
//! never cached.

pub mod api;
pub mod cache;
pub mod config;
pub mod models;
pub mod provider;
pub mod utils;

pub use api::{ApiClient, ApiError, DataService};
pub use config::Config;
pub use provider::DataProvider;
