// Query Gateway Main Entry Point
// Serves keyword, semantic and hybrid search over Elasticsearch, plus
// embedding vectors for arbitrary text
use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Result;
use query_gateway::{api, telemetry, GatewayConfig, Services};
use tracing::info;
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration
    dotenv::dotenv().ok();
    telemetry::init();

    let config = GatewayConfig::from_env()?;
    info!("Starting {}", config.app_name);

    // Shared provider and backend, one instance each for the whole process
    let services = Services::from_config(&config)?;
    services.verify().await?;

    let state = web::Data::new(api::AppState {
        app_name: config.app_name.clone(),
        default_list_size: config.default_list_size,
        services,
    });

    let origins = config.cors_origins.clone();
    let bind = (config.host.clone(), config.service_port);

    info!("🚀 Listening on http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        let cors = origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(cors)
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .configure(api::configure)
    })
    .bind(bind)?
    .run()
    .await?;

    info!("Query gateway stopped");
    Ok(())
}
