//! The meeting summarization workflow.
//!
//! Processing a meeting runs quota enforcement, transcription, summarization
//! and persistence as one sequence. Transcript and summary are written in a
//! single update so a meeting is never left with one but not the other.

use crate::error::{DomainErrorKind, Error, ExternalErrorKind, ProcessingErrorKind};
use crate::gateway::{SummarizationProvider, TranscriptionProvider};
use entity::action_item_status::ActionItemStatus;
use entity::subscription_tier::SubscriptionTier;
use entity::{action_items, users, Id};
use entity_api::{action_item, meeting, month_key, usage_record};
use log::*;
use sea_orm::DatabaseConnection;
use service::config::Config;

/// Per-tier usage limits. `None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierLimits {
    /// Maximum number of summaries per calendar month
    pub monthly_meetings: Option<u32>,
    /// Maximum length of a single recording. Recorded for each tier but not
    /// yet enforced by the workflow.
    pub max_duration_seconds: Option<u32>,
}

/// Usage limits for each subscription tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuotaConfig {
    pub free: TierLimits,
    pub pro: TierLimits,
    pub enterprise: TierLimits,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            free: TierLimits {
                monthly_meetings: Some(5),
                max_duration_seconds: Some(1800),
            },
            pro: TierLimits {
                monthly_meetings: Some(50),
                max_duration_seconds: Some(7200),
            },
            enterprise: TierLimits {
                monthly_meetings: None,
                max_duration_seconds: None,
            },
        }
    }
}

impl QuotaConfig {
    /// Builds the quota table from runtime configuration. The enterprise tier
    /// is always unbounded.
    pub fn from_config(config: &Config) -> Self {
        Self {
            free: TierLimits {
                monthly_meetings: Some(config.free_tier_monthly_meetings),
                max_duration_seconds: Some(config.free_tier_max_duration_seconds),
            },
            pro: TierLimits {
                monthly_meetings: Some(config.pro_tier_monthly_meetings),
                max_duration_seconds: Some(config.pro_tier_max_duration_seconds),
            },
            enterprise: TierLimits {
                monthly_meetings: None,
                max_duration_seconds: None,
            },
        }
    }

    pub fn limits_for(&self, tier: SubscriptionTier) -> TierLimits {
        match tier {
            SubscriptionTier::Free => self.free,
            SubscriptionTier::Pro => self.pro,
            SubscriptionTier::Enterprise => self.enterprise,
        }
    }
}

/// Result of a successful processing run.
#[derive(Debug, PartialEq)]
pub struct ProcessingOutcome {
    pub meeting_id: Id,
    /// Number of action items persisted from the analysis
    pub action_items_created: u64,
}

/// Minutes of audio billed against the monthly quota, rounded up so that any
/// partial minute counts as a whole one.
fn audio_minutes(duration_seconds: Option<i32>) -> i32 {
    // `i32::div_ceil` is unstable; this is the equivalent rounding for a
    // positive divisor.
    let secs = duration_seconds.unwrap_or(0);
    secs / 60 + (secs % 60 > 0) as i32
}

// Gateway failures other than network-level ones are reported as workflow
// failures so the web layer can produce step-specific responses.
fn wrap_gateway_error(err: Error, kind: ProcessingErrorKind) -> Error {
    if matches!(
        err.error_kind,
        DomainErrorKind::External(ExternalErrorKind::Network)
    ) {
        err
    } else {
        Error {
            source: err.source,
            error_kind: DomainErrorKind::Processing(kind),
        }
    }
}

/// Runs the full summarization workflow for one of `user`'s meetings.
///
/// Quota is checked against the caller's tier before any external call is
/// made. A failure to persist the extracted action items is logged but does
/// not fail the run, since the transcript and summary are already saved.
pub async fn process(
    db: &DatabaseConnection,
    quota: &QuotaConfig,
    transcriber: &dyn TranscriptionProvider,
    summarizer: &dyn SummarizationProvider,
    user: &users::Model,
    meeting_id: Id,
) -> Result<ProcessingOutcome, Error> {
    let month = month_key(chrono::Utc::now());
    let usage = usage_record::find_by_user_and_month(db, user.id, &month).await?;

    let limits = quota.limits_for(user.subscription_tier);
    if let (Some(limit), Some(existing)) = (limits.monthly_meetings, &usage) {
        if existing.summaries_count >= limit as i32 {
            info!(
                "User {} reached the monthly limit of {limit} for tier {}",
                user.id, user.subscription_tier
            );
            return Err(Error {
                source: None,
                error_kind: DomainErrorKind::Processing(ProcessingErrorKind::QuotaExceeded),
            });
        }
    }

    let meeting = meeting::find_by_id_and_user_id(db, meeting_id, user.id).await?;

    let audio_url = meeting.audio_url.clone().ok_or_else(|| Error {
        source: None,
        error_kind: DomainErrorKind::Processing(ProcessingErrorKind::MissingAudio),
    })?;

    info!("Processing meeting: {meeting_id}");

    let transcript = transcriber
        .transcribe_audio(&audio_url)
        .await
        .map_err(|err| wrap_gateway_error(err, ProcessingErrorKind::TranscriptionFailed))?;

    let analysis = summarizer
        .generate_summary(&transcript)
        .await
        .map_err(|err| wrap_gateway_error(err, ProcessingErrorKind::SummarizationFailed))?;

    let duration_seconds = meeting.duration_seconds;
    let updated_meeting =
        meeting::set_transcript_and_summary(db, meeting, transcript, analysis.summary).await?;

    let now = chrono::Utc::now();
    let item_models: Vec<action_items::Model> = analysis
        .action_items
        .into_iter()
        .map(|item| action_items::Model {
            id: Id::new_v4(),
            meeting_id: updated_meeting.id,
            description: item.description,
            assignee: item.assignee,
            priority: item.priority,
            status: ActionItemStatus::Pending,
            due_date: None,
            created_at: now.into(),
            updated_at: now.into(),
        })
        .collect();

    let action_items_created =
        match action_item::create_batch(db, updated_meeting.id, item_models).await {
            Ok(count) => count,
            Err(err) => {
                // The summary is already saved at this point, losing the
                // extracted items is recoverable by reprocessing.
                warn!("Failed to persist action items for meeting {meeting_id}: {err:?}");
                0
            }
        };

    let minutes = audio_minutes(duration_seconds);
    match usage {
        Some(existing) => {
            usage_record::increment(db, existing, minutes).await?;
        }
        None => {
            usage_record::create(db, user.id, month, minutes).await?;
        }
    }

    info!("Finished processing meeting: {meeting_id}");

    Ok(ProcessingOutcome {
        meeting_id: updated_meeting.id,
        action_items_created,
    })
}


#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod workflow_tests {
    use super::*;
    use crate::gateway::{ExtractedActionItem, MeetingAnalysis};
    use async_trait::async_trait;
    use entity::priority::Priority;
    use entity::{meetings, usage_records};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr};

    struct StubTranscriber;

    #[async_trait]
    impl TranscriptionProvider for StubTranscriber {
        async fn transcribe_audio(&self, _audio_url: &str) -> Result<String, Error> {
            Ok("full transcript".to_string())
        }
    }

    struct FailingTranscriber;

    #[async_trait]
    impl TranscriptionProvider for FailingTranscriber {
        async fn transcribe_audio(&self, _audio_url: &str) -> Result<String, Error> {
            Err(Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::Other(
                    "transcription rejected".to_string(),
                )),
            })
        }
    }

    struct StubSummarizer {
        analysis: MeetingAnalysis,
    }

    #[async_trait]
    impl SummarizationProvider for StubSummarizer {
        async fn generate_summary(&self, _transcript: &str) -> Result<MeetingAnalysis, Error> {
            Ok(self.analysis.clone())
        }
    }

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

    fn test_meeting(user_id: Id, audio_url: Option<&str>) -> meetings::Model {
        let now = chrono::Utc::now();
        meetings::Model {
            id: Id::new_v4(),
            user_id,
            title: "Weekly sync".to_string(),
            audio_url: audio_url.map(String::from),
            transcript: None,
            summary: None,
            duration_seconds: Some(150),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn usage_with_count(user_id: Id, count: i32) -> usage_records::Model {
        let now = chrono::Utc::now();
        usage_records::Model {
            id: Id::new_v4(),
            user_id,
            month: month_key(chrono::Utc::now()),
            summaries_count: count,
            audio_minutes: count * 10,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn analysis_with_items(count: usize) -> MeetingAnalysis {
        MeetingAnalysis {
            summary: "short summary".to_string(),
            action_items: (0..count)
                .map(|n| ExtractedActionItem {
                    description: format!("Task {n}"),
                    assignee: None,
                    priority: Priority::Medium,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn rejects_free_user_at_monthly_limit() {
        let user = test_user(SubscriptionTier::Free);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[usage_with_count(user.id, 5)]])
            .into_connection();

        let summarizer = StubSummarizer {
            analysis: analysis_with_items(0),
        };
        let result = process(
            &db,
            &QuotaConfig::default(),
            &StubTranscriber,
            &summarizer,
            &user,
            Id::new_v4(),
        )
        .await;

        assert_eq!(
            result.unwrap_err().error_kind,
            DomainErrorKind::Processing(ProcessingErrorKind::QuotaExceeded)
        );
    }

    #[tokio::test]
    async fn rejects_meeting_without_audio() {
        let user = test_user(SubscriptionTier::Free);
        let meeting = test_meeting(user.id, None);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<usage_records::Model>::new()])
            .append_query_results([[meeting.clone()]])
            .into_connection();

        let summarizer = StubSummarizer {
            analysis: analysis_with_items(0),
        };
        let result = process(
            &db,
            &QuotaConfig::default(),
            &StubTranscriber,
            &summarizer,
            &user,
            meeting.id,
        )
        .await;

        assert_eq!(
            result.unwrap_err().error_kind,
            DomainErrorKind::Processing(ProcessingErrorKind::MissingAudio)
        );
    }

    #[tokio::test]
    async fn reports_not_found_for_unowned_meeting() {
        let user = test_user(SubscriptionTier::Pro);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<usage_records::Model>::new()])
            .append_query_results([Vec::<meetings::Model>::new()])
            .into_connection();

        let summarizer = StubSummarizer {
            analysis: analysis_with_items(0),
        };
        let result = process(
            &db,
            &QuotaConfig::default(),
            &StubTranscriber,
            &summarizer,
            &user,
            Id::new_v4(),
        )
        .await;

        assert_eq!(
            result.unwrap_err().error_kind,
            DomainErrorKind::Internal(crate::error::InternalErrorKind::Entity(
                crate::error::EntityErrorKind::NotFound
            ))
        );
    }

    #[tokio::test]
    async fn wraps_transcription_failure_as_processing_error() {
        let user = test_user(SubscriptionTier::Free);
        let meeting = test_meeting(user.id, Some("https://storage.example.com/a.mp3"));

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<usage_records::Model>::new()])
            .append_query_results([[meeting.clone()]])
            .into_connection();

        let summarizer = StubSummarizer {
            analysis: analysis_with_items(0),
        };
        let result = process(
            &db,
            &QuotaConfig::default(),
            &FailingTranscriber,
            &summarizer,
            &user,
            meeting.id,
        )
        .await;

        assert_eq!(
            result.unwrap_err().error_kind,
            DomainErrorKind::Processing(ProcessingErrorKind::TranscriptionFailed)
        );
    }

    #[tokio::test]
    async fn first_summary_of_the_month_creates_a_usage_record() -> Result<(), Error> {
        let user = test_user(SubscriptionTier::Free);
        let meeting = test_meeting(user.id, Some("https://storage.example.com/a.mp3"));

        let mut updated = meeting.clone();
        updated.transcript = Some("full transcript".to_string());
        updated.summary = Some("short summary".to_string());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<usage_records::Model>::new()])
            .append_query_results([[meeting.clone()]])
            .append_query_results([[updated.clone()]])
            .append_query_results([[usage_with_count(user.id, 1)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 2,
            }])
            .into_connection();

        let summarizer = StubSummarizer {
            analysis: analysis_with_items(2),
        };
        let outcome = process(
            &db,
            &QuotaConfig::default(),
            &StubTranscriber,
            &summarizer,
            &user,
            meeting.id,
        )
        .await?;

        assert_eq!(outcome.meeting_id, meeting.id);
        assert_eq!(outcome.action_items_created, 2);

        Ok(())
    }

    #[tokio::test]
    async fn succeeds_when_the_analysis_has_no_action_items() -> Result<(), Error> {
        let user = test_user(SubscriptionTier::Free);
        let meeting = test_meeting(user.id, Some("https://storage.example.com/a.mp3"));

        let mut updated = meeting.clone();
        updated.transcript = Some("full transcript".to_string());
        updated.summary = Some("short summary".to_string());

        // No exec result is queued: an empty batch never reaches the database.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<usage_records::Model>::new()])
            .append_query_results([[meeting.clone()]])
            .append_query_results([[updated.clone()]])
            .append_query_results([[usage_with_count(user.id, 1)]])
            .into_connection();

        let summarizer = StubSummarizer {
            analysis: analysis_with_items(0),
        };
        let outcome = process(
            &db,
            &QuotaConfig::default(),
            &StubTranscriber,
            &summarizer,
            &user,
            meeting.id,
        )
        .await?;

        assert_eq!(outcome.action_items_created, 0);

        Ok(())
    }

    #[tokio::test]
    async fn later_summaries_increment_the_usage_record() -> Result<(), Error> {
        let user = test_user(SubscriptionTier::Pro);
        let meeting = test_meeting(user.id, Some("https://storage.example.com/a.mp3"));

        let mut updated = meeting.clone();
        updated.transcript = Some("full transcript".to_string());
        updated.summary = Some("short summary".to_string());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[usage_with_count(user.id, 4)]])
            .append_query_results([[meeting.clone()]])
            .append_query_results([[updated.clone()]])
            .append_query_results([[usage_with_count(user.id, 5)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let summarizer = StubSummarizer {
            analysis: analysis_with_items(1),
        };
        let outcome = process(
            &db,
            &QuotaConfig::default(),
            &StubTranscriber,
            &summarizer,
            &user,
            meeting.id,
        )
        .await?;

        assert_eq!(outcome.action_items_created, 1);

        Ok(())
    }

    #[tokio::test]
    async fn action_item_insert_failure_does_not_fail_the_run() -> Result<(), Error> {
        let user = test_user(SubscriptionTier::Free);
        let meeting = test_meeting(user.id, Some("https://storage.example.com/a.mp3"));

        let mut updated = meeting.clone();
        updated.transcript = Some("full transcript".to_string());
        updated.summary = Some("short summary".to_string());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<usage_records::Model>::new()])
            .append_query_results([[meeting.clone()]])
            .append_query_results([[updated.clone()]])
            .append_query_results([[usage_with_count(user.id, 1)]])
            .append_exec_errors([DbErr::Exec(RuntimeErr::Internal(
                "insert rejected".to_string(),
            ))])
            .into_connection();

        let summarizer = StubSummarizer {
            analysis: analysis_with_items(1),
        };
        let outcome = process(
            &db,
            &QuotaConfig::default(),
            &StubTranscriber,
            &summarizer,
            &user,
            meeting.id,
        )
        .await?;

        assert_eq!(outcome.action_items_created, 0);

        Ok(())
    }
}
