//! SeaORM Entity for the meetings table.
//!
//! A meeting starts out with only a title and (optionally) a durable audio
//! location. The processing workflow fills in `transcript` and `summary`
//! together; a meeting whose transcript and summary are both null has not
//! been processed yet.

use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::meetings::Model)]
#[sea_orm(schema_name = "summarist", table_name = "meetings")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    #[schema(value_type = Uuid)]
    pub id: Id,

    #[serde(default)]
    #[schema(value_type = Uuid)]
    pub user_id: Id,

    pub title: String,

    /// Durable location of the uploaded audio blob in external object storage.
    #[serde(default)]
    pub audio_url: Option<String>,

    /// Transcribed text. Set together with `summary`, exactly once.
    #[serde(skip_deserializing)]
    #[sea_orm(column_type = "Text", nullable)]
    pub transcript: Option<String>,

    /// AI-generated summary. Set together with `transcript`, exactly once.
    #[serde(skip_deserializing)]
    #[sea_orm(column_type = "Text", nullable)]
    pub summary: Option<String>,

    /// Recording length in seconds, as reported by the upload path.
    #[serde(default)]
    pub duration_seconds: Option<i32>,

    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,

    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,

    #[sea_orm(has_many = "super::action_items::Entity")]
    ActionItems,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::action_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActionItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
