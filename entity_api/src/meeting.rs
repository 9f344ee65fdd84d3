//! CRUD operations for the meetings table.

use super::error::{EntityApiErrorKind, Error};
use entity::meetings::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{
    entity::prelude::*,
    ActiveValue::{Set, Unchanged},
    DatabaseConnection, TryIntoModel,
};

/// Creates a new meeting record owned by `user_id`.
pub async fn create(db: &DatabaseConnection, user_id: Id, model: Model) -> Result<Model, Error> {
    debug!("Creating new meeting for user: {user_id}");

    let now = chrono::Utc::now();

    let active_model = ActiveModel {
        user_id: Set(user_id),
        title: Set(model.title),
        audio_url: Set(model.audio_url),
        duration_seconds: Set(model.duration_seconds),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(active_model.save(db).await?.try_into_model()?)
}

/// Finds a meeting by ID
pub async fn find_by_id(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

/// Finds a meeting by ID, scoped to its owner. A meeting that exists but is
/// owned by a different user is reported as not found.
pub async fn find_by_id_and_user_id(
    db: &DatabaseConnection,
    id: Id,
    user_id: Id,
) -> Result<Model, Error> {
    Entity::find_by_id(id)
        .filter(Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or_else(|| Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordNotFound,
        })
}

/// Persists the transcript and summary onto an already-loaded meeting in a
/// single combined update.
pub async fn set_transcript_and_summary(
    db: &DatabaseConnection,
    existing: Model,
    transcript: String,
    summary: String,
) -> Result<Model, Error> {
    debug!("Setting transcript and summary for meeting: {}", existing.id);

    let active_model = ActiveModel {
        id: Unchanged(existing.id),
        user_id: Unchanged(existing.user_id),
        title: Unchanged(existing.title),
        audio_url: Unchanged(existing.audio_url),
        transcript: Set(Some(transcript)),
        summary: Set(Some(summary)),
        duration_seconds: Unchanged(existing.duration_seconds),
        created_at: Unchanged(existing.created_at),
        updated_at: Set(chrono::Utc::now().into()),
    };

    Ok(active_model.update(db).await?.try_into_model()?)
}

/// Deletes a meeting by ID, scoped to its owner.
pub async fn delete_by_id_and_user_id(
    db: &DatabaseConnection,
    id: Id,
    user_id: Id,
) -> Result<(), Error> {
    let model = find_by_id_and_user_id(db, id, user_id).await?;
    Entity::delete_by_id(model.id).exec(db).await?;
    Ok(())
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn meeting_model(id: Id, user_id: Id) -> Model {
        let now = chrono::Utc::now();
        Model {
            id,
            user_id,
            title: "Sprint retro".to_string(),
            audio_url: Some("https://storage.example.com/audio/retro.mp3".to_string()),
            transcript: None,
            summary: None,
            duration_seconds: Some(1500),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn find_by_id_returns_not_found_for_missing_record() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<Model>::new()])
            .into_connection();

        let result = find_by_id(&db, Id::new_v4()).await;

        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::RecordNotFound
        );
    }

    #[tokio::test]
    async fn find_by_id_and_user_id_returns_owned_meeting() -> Result<(), Error> {
        let meeting_id = Id::new_v4();
        let user_id = Id::new_v4();
        let model = meeting_model(meeting_id, user_id);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[model.clone()]])
            .into_connection();

        let found = find_by_id_and_user_id(&db, meeting_id, user_id).await?;
        assert_eq!(found.id, meeting_id);
        assert_eq!(found.user_id, user_id);

        Ok(())
    }

    #[tokio::test]
    async fn set_transcript_and_summary_updates_both_fields() -> Result<(), Error> {
        let meeting_id = Id::new_v4();
        let user_id = Id::new_v4();
        let existing = meeting_model(meeting_id, user_id);

        let mut updated = existing.clone();
        updated.transcript = Some("full transcript".to_string());
        updated.summary = Some("short summary".to_string());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[updated.clone()]])
            .into_connection();

        let result = set_transcript_and_summary(
            &db,
            existing,
            "full transcript".to_string(),
            "short summary".to_string(),
        )
        .await?;

        assert_eq!(result.transcript.as_deref(), Some("full transcript"));
        assert_eq!(result.summary.as_deref(), Some("short summary"));

        Ok(())
    }
}
