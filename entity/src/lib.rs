use uuid::Uuid;

pub mod prelude;

// Core entities
pub mod action_items;
pub mod meetings;
pub mod usage_records;
pub mod users;

// Active enums shared by the entities above
pub mod action_item_status;
pub mod priority;
pub mod subscription_tier;

/// A type alias that represents any Entity's internal id field data type.
/// Aliased so that it's easy to change the underlying type if necessary.
pub type Id = Uuid;
