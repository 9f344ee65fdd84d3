use crate::{error::Error, meetings, Id};
use entity_api::{mutate, query, query::IntoQueryFilterMap, query::QuerySort};
use sea_orm::DatabaseConnection;
use sea_orm::IntoActiveModel;

pub use entity_api::meeting::{
    create, delete_by_id_and_user_id, find_by_id, find_by_id_and_user_id,
};

pub async fn find_by<P>(db: &DatabaseConnection, params: P) -> Result<Vec<meetings::Model>, Error>
where
    P: IntoQueryFilterMap + QuerySort<meetings::Column>,
{
    let sort_column = params.get_sort_column();
    let sort_order = params.get_sort_order();
    let meetings = query::find_by_sorted::<meetings::Entity, meetings::Column>(
        db,
        params.into_query_filter_map(),
        sort_column,
        sort_order,
    )
    .await?;

    Ok(meetings)
}

/// Updates a meeting's mutable fields, scoped to its owner.
pub async fn update(
    db: &DatabaseConnection,
    meeting_id: Id,
    user_id: Id,
    params: impl mutate::IntoUpdateMap,
) -> Result<meetings::Model, Error> {
    let existing_meeting = find_by_id_and_user_id(db, meeting_id, user_id).await?;
    let active_model = existing_meeting.into_active_model();
    Ok(mutate::update::<meetings::ActiveModel, meetings::Column>(
        db,
        active_model,
        params.into_update_map(),
    )
    .await?)
}
