use log::{error, info};
use service::{config::Config, logging::Logger};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config as &Config);

    let db = match service::init_database(&config).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Could not connect to {}: {e}", config.database_url());
            std::process::exit(1);
        }
    };
    let app_state = service::AppState::new(config, &db);

    info!("Seeding development users and meetings...");
    entity_api::seed_database(app_state.db_conn_ref()).await;
    info!("Seeding complete.");
}
