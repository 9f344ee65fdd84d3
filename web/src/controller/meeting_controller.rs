use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::params::meeting::{IndexParams, UpdateParams};
use crate::{AppState, Error};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::error::{DomainErrorKind, Error as DomainError, InternalErrorKind};
use domain::gateway::openai::OpenAiClient;
use domain::meeting as MeetingApi;
use domain::processing::{self, QuotaConfig};
use domain::{meetings, meetings::Model, Id};
use serde::Deserialize;
use serde_json::json;
use service::config::ApiVersion;
use utoipa::ToSchema;

use log::*;

#[utoipa::path(
    get,
    path = "/meetings",
    params(
        ApiVersion,
        ("sort_by" = Option<crate::params::meeting::MeetingSortField>, Query, description = "Sort by field. Valid values: 'title', 'created_at', 'updated_at'. Must be provided with sort_order.", example = "created_at"),
        ("sort_order" = Option<crate::params::sort::SortOrder>, Query, description = "Sort order. Valid values: 'asc' (ascending), 'desc' (descending). Must be provided with sort_by.", example = "desc")
    ),
    responses(
        (status = 200, description = "Successfully retrieved all Meetings owned by the caller", body = [meetings::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn index(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET all Meetings");
    debug!("Filter Params: {params:?}");

    // The listing is always scoped to the session user, never to a
    // caller-supplied id.
    let mut params = params;
    params.user_id = Some(user.id);

    let meetings = MeetingApi::find_by(app_state.db_conn_ref(), params).await?;

    debug!("Found Meetings: {meetings:?}");

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), meetings)))
}

/// GET a particular Meeting specified by its id.
#[utoipa::path(
    get,
    path = "/meetings/{id}",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Meeting id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a specific Meeting by its id", body = [meetings::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Meeting not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn read(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Meeting by id: {id}");

    let meeting = MeetingApi::find_by_id_and_user_id(app_state.db_conn_ref(), id, user.id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), meeting)))
}

/// POST create a new Meeting
#[utoipa::path(
    post,
    path = "/meetings",
    params(ApiVersion),
    request_body = meetings::Model,
    responses(
        (status = 201, description = "Successfully Created a new Meeting", body = [meetings::Model]),
        (status = 422, description = "Unprocessable Entity"),
        (status = 401, description = "Unauthorized"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn create(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Json(meetings_model): Json<Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a new Meeting from: {meetings_model:?}");

    let meeting = MeetingApi::create(app_state.db_conn_ref(), user.id, meetings_model).await?;

    debug!("New Meeting: {meeting:?}");

    Ok(Json(ApiResponse::new(StatusCode::CREATED.into(), meeting)))
}

/// PUT update a Meeting
#[utoipa::path(
    put,
    path = "/meetings/{id}",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Meeting id to update")
    ),
    request_body = UpdateParams,
    responses(
        (status = 200, description = "Successfully updated a Meeting", body = [meetings::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Meeting not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn update(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    Json(params): Json<UpdateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Update Meeting with id: {id}");

    let meeting = MeetingApi::update(app_state.db_conn_ref(), id, user.id, params).await?;

    debug!("Updated Meeting: {meeting:?}");

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), meeting)))
}

/// DELETE a Meeting specified by its id. Associated action items are removed
/// by the database cascade.
#[utoipa::path(
    delete,
    path = "/meetings/{id}",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Meeting id to delete")
    ),
    responses(
        (status = 200, description = "Successfully deleted a Meeting", body = ()),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Meeting not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn delete(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE Meeting by id: {id}");

    MeetingApi::delete_by_id_and_user_id(app_state.db_conn_ref(), id, user.id).await?;

    Ok(Json(ApiResponse::<()>::no_content(StatusCode::OK.into())))
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct ProcessParams {
    #[schema(value_type = Option<Uuid>)]
    pub(crate) meeting_id: Option<Id>,
}

/// POST run the summarization workflow for one of the caller's meetings:
/// transcribe its audio, generate a summary with extracted action items and
/// record the run against the caller's monthly quota.
#[utoipa::path(
    post,
    path = "/meetings/process",
    params(ApiVersion),
    request_body = ProcessParams,
    responses(
        (status = 200, description = "Successfully processed the Meeting"),
        (status = 400, description = "Meeting ID missing or Meeting has no audio"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Monthly meeting limit reached"),
        (status = 404, description = "Meeting not found"),
        (status = 500, description = "Transcription or summarization failed"),
        (status = 502, description = "Bad Gateway")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn process(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Json(params): Json<ProcessParams>,
) -> Result<impl IntoResponse, Error> {
    let Some(meeting_id) = params.meeting_id else {
        return Ok((StatusCode::BAD_REQUEST, "Meeting ID is required").into_response());
    };

    debug!("POST Process Meeting with id: {meeting_id}");

    let api_key = app_state.config.openai_api_key().ok_or_else(|| {
        DomainError {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
        }
    })?;
    let client = OpenAiClient::new(&api_key, app_state.config.openai_base_url())?;
    let quota = QuotaConfig::from_config(&app_state.config);

    let outcome = processing::process(
        app_state.db_conn_ref(),
        &quota,
        &client,
        &client,
        &user,
        meeting_id,
    )
    .await?;

    debug!("Processing outcome: {outcome:?}");

    Ok(Json(ApiResponse::new(
        StatusCode::OK.into(),
        json!({
            "success": true,
            "message": "Meeting processed successfully",
            "meeting_id": outcome.meeting_id,
            "action_items_created": outcome.action_items_created
        }),
    ))
    .into_response())
}
