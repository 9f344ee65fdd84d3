use sea_orm::{Order, Value};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::sort::SortOrder;
use domain::{meetings, Id, IntoQueryFilterMap, IntoUpdateMap, QueryFilterMap, QuerySort, UpdateMap};

/// Sortable fields for meetings
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = "created_at")]
pub(crate) enum MeetingSortField {
    #[serde(rename = "title")]
    Title,
    #[serde(rename = "created_at")]
    CreatedAt,
    #[serde(rename = "updated_at")]
    UpdatedAt,
}

#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct IndexParams {
    /// Populated from the session, never from the query string.
    #[serde(skip)]
    #[param(ignore)]
    pub(crate) user_id: Option<Id>,
    pub(crate) sort_by: Option<MeetingSortField>,
    pub(crate) sort_order: Option<SortOrder>,
}

impl IntoQueryFilterMap for IndexParams {
    fn into_query_filter_map(self) -> QueryFilterMap {
        let mut query_filter_map = QueryFilterMap::new();
        if let Some(user_id) = self.user_id {
            query_filter_map.insert(
                "user_id".to_string(),
                Some(Value::Uuid(Some(Box::new(user_id)))),
            );
        }

        query_filter_map
    }
}

impl QuerySort<meetings::Column> for IndexParams {
    fn get_sort_column(&self) -> Option<meetings::Column> {
        self.sort_by.as_ref().map(|field| match field {
            MeetingSortField::Title => meetings::Column::Title,
            MeetingSortField::CreatedAt => meetings::Column::CreatedAt,
            MeetingSortField::UpdatedAt => meetings::Column::UpdatedAt,
        })
    }

    fn get_sort_order(&self) -> Option<Order> {
        self.sort_order.as_ref().map(|order| match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        })
    }
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub(crate) struct UpdateParams {
    pub(crate) title: Option<String>,
    pub(crate) audio_url: Option<String>,
    pub(crate) duration_seconds: Option<i32>,
}

impl IntoUpdateMap for UpdateParams {
    fn into_update_map(self) -> UpdateMap {
        let mut update_map = UpdateMap::new();
        if let Some(title) = self.title {
            update_map.insert(
                "title".to_string(),
                Some(Value::String(Some(Box::new(title)))),
            );
        }
        if let Some(audio_url) = self.audio_url {
            update_map.insert(
                "audio_url".to_string(),
                Some(Value::String(Some(Box::new(audio_url)))),
            );
        }
        if let Some(duration_seconds) = self.duration_seconds {
            update_map.insert(
                "duration_seconds".to_string(),
                Some(Value::Int(Some(duration_seconds))),
            );
        }
        update_map
    }
}
