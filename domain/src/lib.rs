//! This module re-exports various items from the `entity_api` crate.
//!
//! The purpose of this re-export is to ensure that consumers of the `domain` crate do not need to
//! directly depend on the `entity_api` crate. By re-exporting these items, we provide a clear and
//! consistent interface for working with query filters within the domain layer, while encapsulating
//! the underlying implementation details remain in the `entity_api` crate.
pub use entity_api::{
    mutate::{IntoUpdateMap, UpdateMap},
    query::{IntoQueryFilterMap, QueryFilterMap},
};

// Re-exports from `entity` crate via `entity_api`
pub use entity_api::{
    action_item_status, action_items, meetings, priority, query::QuerySort, subscription_tier,
    usage_records, users, Id,
};

pub mod action_item;
pub mod error;
pub mod meeting;
pub mod processing;
pub mod usage;
pub mod user;

pub mod gateway;
