use chrono::NaiveDate;
use sea_orm::Value;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use domain::action_item_status::ActionItemStatus;
use domain::priority::Priority;
use domain::{Id, IntoUpdateMap, UpdateMap};

#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct IndexParams {
    #[param(value_type = Uuid)]
    pub(crate) meeting_id: Id,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub(crate) struct UpdateParams {
    pub(crate) description: Option<String>,
    pub(crate) assignee: Option<String>,
    pub(crate) priority: Option<Priority>,
    pub(crate) due_date: Option<NaiveDate>,
}

impl IntoUpdateMap for UpdateParams {
    fn into_update_map(self) -> UpdateMap {
        let mut update_map = UpdateMap::new();
        if let Some(description) = self.description {
            update_map.insert(
                "description".to_string(),
                Some(Value::String(Some(Box::new(description)))),
            );
        }
        if let Some(assignee) = self.assignee {
            update_map.insert(
                "assignee".to_string(),
                Some(Value::String(Some(Box::new(assignee)))),
            );
        }
        if let Some(priority) = self.priority {
            update_map.insert(
                "priority".to_string(),
                Some(Value::String(Some(Box::new(priority.to_string())))),
            );
        }
        if let Some(due_date) = self.due_date {
            update_map.insert(
                "due_date".to_string(),
                Some(Value::ChronoDate(Some(Box::new(due_date)))),
            );
        }
        update_map
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct UpdateStatusParams {
    pub(crate) status: ActionItemStatus,
}
