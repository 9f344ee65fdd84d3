use crate::error::Error;
use sea_orm::strum::IntoEnumIterator;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, QueryOrder, Value};
use std::collections::HashMap;

/// `QueryFilterMap` is a data structure that serves as a bridge for translating filter parameters
/// between different layers of the application. It is essentially a wrapper around a `HashMap`
/// where the keys are filter parameter names (as `String`) and the values are optional `Value` types
/// from `sea_orm`.
///
/// This structure is particularly useful in scenarios where you need to pass filter parameters
/// from a web request down to the database query layer in a type-safe and organized manner.
pub struct QueryFilterMap {
    map: HashMap<String, Option<Value>>,
}

impl QueryFilterMap {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        // HashMap.get returns an Option and so we need to "flatten" this to a single Option
        self.map
            .get(key)
            .and_then(|inner_option| inner_option.clone())
    }

    pub fn insert(&mut self, key: String, value: Option<Value>) {
        self.map.insert(key, value);
    }
}

impl Default for QueryFilterMap {
    fn default() -> Self {
        Self::new()
    }
}

/// `IntoQueryFilterMap` is a trait that provides a method for converting a struct into a
/// `QueryFilterMap`, typically from web request parameters to database query filters.
/// Implementing this trait for a struct defines how its fields map to the keys and values
/// of the `QueryFilterMap`.
pub trait IntoQueryFilterMap {
    fn into_query_filter_map(self) -> QueryFilterMap;
}

/// `QuerySort` allows a parameter struct to express an optional sort column and order
/// for an entity's listing endpoint.
pub trait QuerySort<C: ColumnTrait> {
    fn get_sort_column(&self) -> Option<C>;
    fn get_sort_order(&self) -> Option<Order>;
}

/// Find all records of an entity by the given query filter map, ordered by
/// `sort_column` when one is given (unsorted otherwise).
pub async fn find_by_sorted<E, C>(
    db: &DatabaseConnection,
    query_filter_map: QueryFilterMap,
    sort_column: Option<C>,
    sort_order: Option<Order>,
) -> Result<Vec<E::Model>, Error>
where
    E: EntityTrait<Column = C>,
    C: ColumnTrait + IntoEnumIterator,
{
    let mut query = E::find();

    // We iterate through the entity's defined columns so that we only attempt
    // to filter by columns that exist.
    for column in C::iter() {
        if let Some(value) = query_filter_map.get(&column.to_string()) {
            query = query.filter(column.eq(value));
        }
    }

    if let Some(sort_column) = sort_column {
        query = query.order_by(sort_column, sort_order.unwrap_or(Order::Asc));
    }

    Ok(query.all(db).await?)
}
