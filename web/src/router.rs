use crate::{controller::health_check_controller, middleware::auth::require_auth, params, AppState};
use axum::{
    middleware::from_fn,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::services::ServeDir;

use crate::controller::{
    action_item_controller, meeting_controller, usage_controller, user_controller,
    user_session_controller,
};

use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Summarist API"
        ),
        paths(
            meeting_controller::index,
            meeting_controller::read,
            meeting_controller::create,
            meeting_controller::update,
            meeting_controller::delete,
            meeting_controller::process,
            action_item_controller::index,
            action_item_controller::update,
            action_item_controller::update_status,
            action_item_controller::delete,
            usage_controller::index,
            user_controller::create,
            user_session_controller::login,
            user_session_controller::delete,
        ),
        components(
            schemas(
                domain::meetings::Model,
                domain::action_items::Model,
                domain::users::Model,
                domain::user::Credentials,
                params::user::CreateParams,
                params::meeting::UpdateParams,
                params::action_item::UpdateParams,
                params::action_item::UpdateStatusParams,
                meeting_controller::ProcessParams,
            )
        ),
        modifiers(&SecurityAddon),
        tags(
            (name = "summarist", description = "Meeting Summarizer API")
        )
    )]
struct ApiDoc;

struct SecurityAddon;

// Defines our cookie session based authentication requirement for gaining access to our
// API endpoints for OpenAPI.
impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "id",
                    "Session id value returned from successful login via Set-Cookie header",
                ))),
            )
        }
    }
}

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(meeting_routes(app_state.clone()))
        .merge(action_item_routes(app_state.clone()))
        .merge(usage_routes(app_state.clone()))
        .merge(user_routes(app_state.clone()))
        .merge(user_session_routes())
        .merge(user_session_protected_routes(app_state.clone()))
        .merge(health_routes())
        .merge(RapiDoc::with_openapi("/api-docs/openapi2.json", ApiDoc::openapi()).path("/rapidoc"))
        .fallback_service(static_routes())
}

pub fn meeting_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/meetings", get(meeting_controller::index))
        .route("/meetings/:id", get(meeting_controller::read))
        .route("/meetings", post(meeting_controller::create))
        .route("/meetings/:id", put(meeting_controller::update))
        .route("/meetings/:id", delete(meeting_controller::delete))
        .route("/meetings/process", post(meeting_controller::process))
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn action_item_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/action_items", get(action_item_controller::index))
        .route("/action_items/:id", put(action_item_controller::update))
        .route(
            "/action_items/:id/status",
            put(action_item_controller::update_status),
        )
        .route("/action_items/:id", delete(action_item_controller::delete))
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn usage_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/usage", get(usage_controller::index))
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

// Registration is the one unauthenticated write endpoint.
pub fn user_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/users", post(user_controller::create))
        .with_state(app_state)
}

pub fn user_session_protected_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/logout", delete(user_session_controller::delete))
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

pub fn user_session_routes() -> Router {
    Router::new().route("/login", post(user_session_controller::login))
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

// This will serve static files that we can use as a "fallback" for when the server panics
pub fn static_routes() -> Router {
    Router::new().nest_service("/", ServeDir::new("./"))
}
