use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::{AppState, Error};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::processing::QuotaConfig;
use domain::usage as UsageApi;
use service::config::ApiVersion;

use log::*;

/// GET the caller's usage for the current calendar month, together with the
/// monthly limit for their subscription tier.
#[utoipa::path(
    get,
    path = "/usage",
    params(ApiVersion),
    responses(
        (status = 200, description = "Successfully retrieved the caller's current usage"),
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
) -> Result<impl IntoResponse, Error> {
    debug!("GET current usage for user: {}", user.id);

    let quota = QuotaConfig::from_config(&app_state.config);
    let usage = UsageApi::current_for_user(app_state.db_conn_ref(), &quota, &user).await?;

    debug!("Current usage: {usage:?}");

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), usage)))
}
