use std::sync::Arc;

use salvo::{listener::TcpListener, Server};

use fleetops_backend::config::env_var;
use fleetops_backend::infra::{
    database::connection,
    migration::{self, MigrationConfig},
    router,
    service::security::{Argon2HashService, JwtEncryptionService},
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let migration_config = MigrationConfig::from_env();
    let activity = migration::find_activity(&migration_config, migration::MAIN_ACTIVITY)
        .expect("Expect the main migration activity to be registered");
    migration::run(&activity)
        .await
        .expect("Expect the main migration activity to apply the changelog");

    let pool = connection::create_pool().await;
    let hash_service = Arc::new(Argon2HashService::new());
    let token_service = Arc::new(JwtEncryptionService::new(env_var::get().token_key.clone()));

    let address = format!("0.0.0.0:{}", env_var::get().port);
    let listener = TcpListener::bind(&address);
    Server::new(listener)
        .serve(router::app(&pool, hash_service, token_service))
        .await;
}
