use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use axum_login::{
    tower_sessions::{Expiry, SessionManagerLayer},
    AuthManagerLayerBuilder,
};
use log::*;
use time::Duration;
use tower_http::cors::CorsLayer;
use tower_sessions_sqlx_store::PostgresStore;

pub use self::error::{Error, Result};
pub use service::AppState;

mod controller;
mod error;
mod extractors;
mod middleware;
mod params;
mod router;

pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    // Session layer backed by the sessions table so that logins survive
    // server restarts.
    let pool = app_state
        .database_connection
        .get_postgres_connection_pool()
        .clone();
    let session_store = PostgresStore::new(pool);
    session_store
        .migrate()
        .await
        .map_err(|err| std::io::Error::other(format!("Session store migration failed: {err}")))?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(app_state.config.is_production())
        .with_expiry(Expiry::OnInactivity(Duration::seconds(
            app_state.config.backend_session_expiry_seconds as i64,
        )));

    // Auth service
    let backend = domain::user::Backend::new(&app_state.database_connection);
    let auth_layer = AuthManagerLayerBuilder::new(backend, session_layer).build();

    let cors_layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([ACCEPT, AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true)
        .allow_origin(
            app_state
                .config
                .allowed_origins
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("Skipping invalid allowed origin: {origin}");
                        None
                    }
                })
                .collect::<Vec<_>>(),
        );

    let listen_addr = format!(
        "{}:{}",
        app_state.config.interface.as_deref().unwrap_or("127.0.0.1"),
        app_state.config.port
    );

    let router = router::define_routes(app_state)
        .layer(cors_layer)
        .layer(auth_layer);

    info!("Server starting... listening for connections on http://{listen_addr}");

    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, router).await
}
