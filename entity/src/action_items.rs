//! SeaORM Entity for the action_items table.
//! Action items are extracted in bulk by the summarization capability.

use crate::action_item_status::ActionItemStatus;
use crate::priority::Priority;
use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::action_items::Model)]
#[sea_orm(schema_name = "summarist", table_name = "action_items")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    #[schema(value_type = Uuid)]
    pub id: Id,

    #[schema(value_type = Uuid)]
    pub meeting_id: Id,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Person the item was assigned to, when one was identified in the
    /// transcript.
    pub assignee: Option<String>,

    pub priority: Priority,

    pub status: ActionItemStatus,

    #[schema(value_type = Option<String>, format = Date)]
    pub due_date: Option<Date>,

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
        belongs_to = "super::meetings::Entity",
        from = "Column::MeetingId",
        to = "super::meetings::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Meetings,
}

impl Related<super::meetings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Meetings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
