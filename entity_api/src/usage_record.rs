//! CRUD operations for the usage_records table.
//!
//! The database enforces at most one record per (user, month); the
//! processing workflow creates the month's record on first use and
//! increments it afterwards.

use super::error::Error;
use entity::usage_records::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{
    entity::prelude::*,
    ActiveValue::{Set, Unchanged},
    DatabaseConnection, TryIntoModel,
};

/// Finds the usage record for a user in the given `YYYY-MM` month, if any.
pub async fn find_by_user_and_month(
    db: &DatabaseConnection,
    user_id: Id,
    month: &str,
) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::Month.eq(month))
        .one(db)
        .await?)
}

/// Creates the first usage record of the month for a user with a single
/// summary counted and `audio_minutes` accumulated.
pub async fn create(
    db: &DatabaseConnection,
    user_id: Id,
    month: String,
    audio_minutes: i32,
) -> Result<Model, Error> {
    debug!("Creating usage record for user {user_id}, month {month}");

    let now = chrono::Utc::now();

    let active_model = ActiveModel {
        user_id: Set(user_id),
        month: Set(month),
        summaries_count: Set(1),
        audio_minutes: Set(audio_minutes),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(active_model.save(db).await?.try_into_model()?)
}

/// Increments an existing usage record by one summary and `audio_minutes`
/// minutes.
pub async fn increment(
    db: &DatabaseConnection,
    existing: Model,
    audio_minutes: i32,
) -> Result<Model, Error> {
    debug!(
        "Incrementing usage record {} to count {}",
        existing.id,
        existing.summaries_count + 1
    );

    let active_model = ActiveModel {
        id: Unchanged(existing.id),
        user_id: Unchanged(existing.user_id),
        month: Unchanged(existing.month),
        summaries_count: Set(existing.summaries_count + 1),
        audio_minutes: Set(existing.audio_minutes + audio_minutes),
        created_at: Unchanged(existing.created_at),
        updated_at: Set(chrono::Utc::now().into()),
    };

    Ok(active_model.update(db).await?.try_into_model()?)
}
