use chrono::{DateTime, Utc};
use password_auth::generate_hash;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

pub use entity::{
    action_item_status, action_items, meetings, priority, subscription_tier, usage_records, users,
    Id,
};

pub mod action_item;
pub mod error;
pub mod meeting;
pub mod mutate;
pub mod query;
pub mod usage_record;
pub mod user;

pub fn uuid_parse_str(uuid_str: &str) -> Result<Id, error::Error> {
    Id::parse_str(uuid_str).map_err(|_| error::Error {
        source: None,
        error_kind: error::EntityApiErrorKind::InvalidQueryTerm,
    })
}

/// Formats the month key (`YYYY-MM`) a usage record is bucketed under.
pub fn month_key(at: DateTime<Utc>) -> String {
    at.format("%Y-%m").to_string()
}

pub async fn seed_database(db: &DatabaseConnection) {
    let now = Utc::now();

    let free_user: users::ActiveModel = users::ActiveModel {
        email: Set("dev@summarist.local".to_owned()),
        name: Set(Some("Dev User".to_owned())),
        password: Set(generate_hash("password")),
        subscription_tier: Set(entity::subscription_tier::SubscriptionTier::Free),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();

    let pro_user: users::ActiveModel = users::ActiveModel {
        email: Set("pro@summarist.local".to_owned()),
        name: Set(Some("Pro User".to_owned())),
        password: Set(generate_hash("password")),
        subscription_tier: Set(entity::subscription_tier::SubscriptionTier::Pro),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();

    meetings::ActiveModel {
        user_id: Set(free_user.id.clone().unwrap()),
        title: Set("Weekly sync".to_owned()),
        audio_url: Set(Some(
            "https://storage.summarist.local/audio/weekly-sync.mp3".to_owned(),
        )),
        duration_seconds: Set(Some(600)),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();

    meetings::ActiveModel {
        user_id: Set(pro_user.id.clone().unwrap()),
        title: Set("Quarterly planning".to_owned()),
        audio_url: Set(Some(
            "https://storage.summarist.local/audio/quarterly-planning.mp3".to_owned(),
        )),
        duration_seconds: Set(Some(3300)),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();
}
