//! Remote fetch operations for the retail data service.
//!
//! This module provides the `DataService` contract the coordinator consumes
//! (one asynchronous fetch per entity type) and the `ApiClient`
//! implementation over the service's OData endpoints. The coordinator treats
//! the service as opaque: request construction, transport, and
//! deserialization all live behind the trait.

pub mod client;
pub mod error;
pub mod service;

pub use client::ApiClient;
pub use error::ApiError;
pub use service::DataService;
