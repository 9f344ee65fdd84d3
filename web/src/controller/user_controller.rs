use crate::controller::ApiResponse;
use crate::extractors::compare_api_version::CompareApiVersion;
use crate::params::user::CreateParams;
use crate::{AppState, Error};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::user as UserApi;
use domain::users;
use service::config::ApiVersion;

use log::*;

/// POST register a new user account. This is the only unauthenticated write
/// endpoint; the password is hashed before storage and never returned.
#[utoipa::path(
    post,
    path = "/users",
    params(ApiVersion),
    request_body = CreateParams,
    responses(
        (status = 201, description = "Successfully created a new User", body = [users::Model]),
        (status = 422, description = "Unprocessable Entity"),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn create(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Json(params): Json<CreateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a new User with email: {}", params.email);

    let user = UserApi::create(app_state.db_conn_ref(), params.into_new_user()).await?;

    debug!("New User created with id: {}", user.id);

    Ok(Json(ApiResponse::new(StatusCode::CREATED.into(), user)))
}
