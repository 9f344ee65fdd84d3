use crate::error::Error;
use crate::processing::QuotaConfig;
use crate::users;
use entity_api::{month_key, usage_record};
use sea_orm::DatabaseConnection;
use serde::Serialize;

/// Snapshot of a user's consumption for the current calendar month, together
/// with the monthly limit for their tier. Months with no activity report zero
/// rather than a missing record.
#[derive(Debug, Serialize, PartialEq)]
pub struct CurrentUsage {
    pub month: String,
    pub summaries_count: i32,
    pub audio_minutes: i32,
    pub monthly_limit: Option<u32>,
}

pub async fn current_for_user(
    db: &DatabaseConnection,
    quota: &QuotaConfig,
    user: &users::Model,
) -> Result<CurrentUsage, Error> {
    let month = month_key(chrono::Utc::now());
    let record = usage_record::find_by_user_and_month(db, user.id, &month).await?;
    let monthly_limit = quota.limits_for(user.subscription_tier).monthly_meetings;

    Ok(match record {
        Some(record) => CurrentUsage {
            month,
            summaries_count: record.summaries_count,
            audio_minutes: record.audio_minutes,
            monthly_limit,
        },
        None => CurrentUsage {
            month,
            summaries_count: 0,
            audio_minutes: 0,
            monthly_limit,
        },
    })
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use crate::usage_records;
    use entity::subscription_tier::SubscriptionTier;
    use entity::Id;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn test_user(tier: SubscriptionTier) -> users::Model {
        let now = chrono::Utc::now();
        users::Model {
            id: Id::new_v4(),
            email: "test@example.com".to_string(),
            name: None,
            password: "hash".to_string(),
            subscription_tier: tier,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn reports_zero_usage_for_a_fresh_month() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<usage_records::Model>::new()])
            .into_connection();

        let usage =
            current_for_user(&db, &QuotaConfig::default(), &test_user(SubscriptionTier::Free))
                .await?;

        assert_eq!(usage.summaries_count, 0);
        assert_eq!(usage.audio_minutes, 0);
        assert_eq!(usage.monthly_limit, Some(5));

        Ok(())
    }

    #[tokio::test]
    async fn reports_recorded_usage_and_tier_limit() -> Result<(), Error> {
        let user = test_user(SubscriptionTier::Pro);
        let now = chrono::Utc::now();
        let record = usage_records::Model {
            id: Id::new_v4(),
            user_id: user.id,
            month: month_key(now),
            summaries_count: 12,
            audio_minutes: 340,
            created_at: now.into(),
            updated_at: now.into(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[record]])
            .into_connection();

        let usage = current_for_user(&db, &QuotaConfig::default(), &user).await?;

        assert_eq!(usage.summaries_count, 12);
        assert_eq!(usage.audio_minutes, 340);
        assert_eq!(usage.monthly_limit, Some(50));

        Ok(())
    }
}
