use serde::Deserialize;
use utoipa::ToSchema;

use domain::subscription_tier::SubscriptionTier;
use domain::{users, Id};

/// Parameters accepted when registering a new user account.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateParams {
    pub email: String,
    pub name: Option<String>,
    /// Plaintext password, hashed before storage.
    pub password: String,
}

impl CreateParams {
    // New accounts always start on the free tier; the request body cannot
    // select one.
    pub(crate) fn into_new_user(self) -> users::Model {
        let now = chrono::Utc::now();
        users::Model {
            id: Id::new_v4(),
            email: self.email,
            name: self.name,
            password: self.password,
            subscription_tier: SubscriptionTier::default(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }
}
