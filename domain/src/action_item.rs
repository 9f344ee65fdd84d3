use crate::{action_items, error::Error, meeting, Id};
use entity::action_item_status::ActionItemStatus;
use entity_api::{action_item, mutate};
use sea_orm::DatabaseConnection;
use sea_orm::IntoActiveModel;

/// Lists a meeting's action items, after confirming the meeting belongs to
/// `user_id`.
pub async fn find_by_meeting(
    db: &DatabaseConnection,
    meeting_id: Id,
    user_id: Id,
) -> Result<Vec<action_items::Model>, Error> {
    meeting::find_by_id_and_user_id(db, meeting_id, user_id).await?;
    Ok(action_item::find_by_meeting_id(db, meeting_id).await?)
}

/// Updates an action item's mutable fields, scoped through its parent meeting's
/// owner.
pub async fn update(
    db: &DatabaseConnection,
    action_item_id: Id,
    user_id: Id,
    params: impl mutate::IntoUpdateMap,
) -> Result<action_items::Model, Error> {
    let existing = action_item::find_by_id(db, action_item_id).await?;
    meeting::find_by_id_and_user_id(db, existing.meeting_id, user_id).await?;

    let active_model = existing.into_active_model();
    Ok(
        mutate::update::<action_items::ActiveModel, action_items::Column>(
            db,
            active_model,
            params.into_update_map(),
        )
        .await?,
    )
}

pub async fn update_status(
    db: &DatabaseConnection,
    action_item_id: Id,
    user_id: Id,
    status: ActionItemStatus,
) -> Result<action_items::Model, Error> {
    let existing = action_item::find_by_id(db, action_item_id).await?;
    meeting::find_by_id_and_user_id(db, existing.meeting_id, user_id).await?;

    Ok(action_item::update_status(db, action_item_id, status).await?)
}

pub async fn delete(db: &DatabaseConnection, action_item_id: Id, user_id: Id) -> Result<(), Error> {
    let existing = action_item::find_by_id(db, action_item_id).await?;
    meeting::find_by_id_and_user_id(db, existing.meeting_id, user_id).await?;

    Ok(action_item::delete_by_id(db, action_item_id).await?)
}
