use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::params::action_item::{IndexParams, UpdateParams, UpdateStatusParams};
use crate::{AppState, Error};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::action_item as ActionItemApi;
use domain::{action_items, Id};
use service::config::ApiVersion;

use log::*;

/// GET all Action Items belonging to one of the caller's meetings
#[utoipa::path(
    get,
    path = "/action_items",
    params(
        ApiVersion,
        ("meeting_id" = Uuid, Query, description = "Filter by meeting_id")
    ),
    responses(
        (status = 200, description = "Successfully retrieved all Action Items for a Meeting", body = [action_items::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Meeting not found"),
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
    debug!("GET all Action Items");
    debug!("Filter Params: {params:?}");

    let action_items =
        ActionItemApi::find_by_meeting(app_state.db_conn_ref(), params.meeting_id, user.id).await?;

    debug!("Found Action Items: {action_items:?}");

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), action_items)))
}

/// PUT update an Action Item
#[utoipa::path(
    put,
    path = "/action_items/{id}",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Action Item id to update")
    ),
    request_body = UpdateParams,
    responses(
        (status = 200, description = "Successfully updated an Action Item", body = [action_items::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Action Item not found"),
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
    debug!("PUT Update Action Item with id: {id}");

    let action_item = ActionItemApi::update(app_state.db_conn_ref(), id, user.id, params).await?;

    debug!("Updated Action Item: {action_item:?}");

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), action_item)))
}

/// PUT update only an Action Item's status
#[utoipa::path(
    put,
    path = "/action_items/{id}/status",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Action Item id to update")
    ),
    request_body = UpdateStatusParams,
    responses(
        (status = 200, description = "Successfully updated the Action Item's status", body = [action_items::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Action Item not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn update_status(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    Json(params): Json<UpdateStatusParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Update Action Item Status with id: {id}");

    let action_item =
        ActionItemApi::update_status(app_state.db_conn_ref(), id, user.id, params.status).await?;

    debug!("Updated Action Item: {action_item:?}");

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), action_item)))
}

/// DELETE an Action Item specified by its id
#[utoipa::path(
    delete,
    path = "/action_items/{id}",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Action Item id to delete")
    ),
    responses(
        (status = 200, description = "Successfully deleted an Action Item", body = ()),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Action Item not found"),
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
    debug!("DELETE Action Item by id: {id}");

    ActionItemApi::delete(app_state.db_conn_ref(), id, user.id).await?;

    Ok(Json(ApiResponse::<()>::no_content(StatusCode::OK.into())))
}
