use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Subscription tier of a user. The tier determines the monthly
/// summarization quota applied by the processing workflow.
#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    EnumIter,
    Deserialize,
    Default,
    Serialize,
    DeriveActiveEnum,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "subscription_tier")]
pub enum SubscriptionTier {
    #[sea_orm(string_value = "free")]
    #[default]
    Free,
    #[sea_orm(string_value = "pro")]
    Pro,
    #[sea_orm(string_value = "enterprise")]
    Enterprise,
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionTier::Free => write!(fmt, "free"),
            SubscriptionTier::Pro => write!(fmt, "pro"),
            SubscriptionTier::Enterprise => write!(fmt, "enterprise"),
        }
    }
}
