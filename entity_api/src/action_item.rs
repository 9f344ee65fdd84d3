//! CRUD operations for the action_items table.

use super::error::{EntityApiErrorKind, Error};
use entity::action_item_status::ActionItemStatus;
use entity::action_items::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{
    entity::prelude::*,
    ActiveValue::{Set, Unchanged},
    DatabaseConnection, QueryOrder, TryIntoModel,
};

/// Bulk-inserts action items, each stamped with `meeting_id`.
///
/// Returns the number of rows inserted. Ids are assigned by the database;
/// callers that need the created rows back should query by meeting id.
pub async fn create_batch(
    db: &DatabaseConnection,
    meeting_id: Id,
    items: Vec<Model>,
) -> Result<u64, Error> {
    if items.is_empty() {
        return Ok(0);
    }

    debug!(
        "Bulk inserting {} action item(s) for meeting: {meeting_id}",
        items.len()
    );

    let now = chrono::Utc::now();
    let active_models: Vec<ActiveModel> = items
        .into_iter()
        .map(|item| ActiveModel {
            meeting_id: Set(meeting_id),
            description: Set(item.description),
            assignee: Set(item.assignee),
            priority: Set(item.priority),
            status: Set(ActionItemStatus::Pending),
            due_date: Set(item.due_date),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        })
        .collect();

    let result = Entity::insert_many(active_models)
        .exec_without_returning(db)
        .await?;

    Ok(result)
}

/// Finds all action items belonging to a meeting.
pub async fn find_by_meeting_id(
    db: &DatabaseConnection,
    meeting_id: Id,
) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::MeetingId.eq(meeting_id))
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?)
}

/// Finds an action item by ID
pub async fn find_by_id(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

/// Updates only the completion status of an action item.
pub async fn update_status(
    db: &DatabaseConnection,
    id: Id,
    status: ActionItemStatus,
) -> Result<Model, Error> {
    let existing = find_by_id(db, id).await?;

    debug!("Updating action item status to {status}: {id}");

    let active_model = ActiveModel {
        id: Unchanged(existing.id),
        meeting_id: Unchanged(existing.meeting_id),
        description: Unchanged(existing.description),
        assignee: Unchanged(existing.assignee),
        priority: Unchanged(existing.priority),
        status: Set(status),
        due_date: Unchanged(existing.due_date),
        created_at: Unchanged(existing.created_at),
        updated_at: Set(chrono::Utc::now().into()),
    };

    Ok(active_model.update(db).await?.try_into_model()?)
}

/// Deletes an action item by ID
pub async fn delete_by_id(db: &DatabaseConnection, id: Id) -> Result<(), Error> {
    let model = find_by_id(db, id).await?;
    Entity::delete_by_id(model.id).exec(db).await?;
    Ok(())
}
