pub use super::action_items::Entity as ActionItems;
pub use super::meetings::Entity as Meetings;
pub use super::usage_records::Entity as UsageRecords;
pub use super::users::Entity as Users;
