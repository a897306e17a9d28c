use std::time::Instant;

use actix_web::{
    middleware::Logger,
    web, App, HttpServer,
};
use env_logger::Env;
use log::{debug, info};

use crate::{
    config::{Config, Environment},
    db::Database,
    errors::AppError,
    middleware::RequestLogger,
    repositories::UrlRepository,
    routes, services,
    types::AppState,
};

pub type AppResult<T> = Result<T, AppError>;

// Logger setup; RUST_LOG always wins over the per-environment default
fn setup_logging(config: &Config) -> AppResult<()> {
    let log_level = match config.app.environment {
        Environment::Development => config.app.log_level.clone(),
        Environment::Testing => "debug,actix_web=info".to_string(),
        Environment::Production => "info,actix_web=warn".to_string(),
    };

    let env = Env::default()
        .filter_or("RUST_LOG", log_level)
        .write_style_or("RUST_LOG_STYLE", "always");

    env_logger::try_init_from_env(env)
        .map_err(|e| AppError::Logger(format!("Failed to initialize logger: {}", e)))
}

pub async fn server() -> AppResult<()> {
    let config = Config::load()?;
    setup_logging(&config)?;

    let start_time = Instant::now();

    info!("Starting {} v{}", config.app.name, config.app.version);
    info!("Environment: {:?}", config.app.environment);
    info!(
        "Binding to {}:{} with {} workers",
        config.server.host, config.server.port, config.server.workers
    );

    if config.app.environment == Environment::Development {
        debug!("Full configuration: {:?}", config);
    }

    let db = Database::connect(&config.db)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let url_service = services::build(UrlRepository::new(&db));
    let app_state = web::Data::new(AppState {
        start_time,
        db: db.clone(),
        version: config.app.version.clone(),
    });
    let app_config = web::Data::new(config.app.clone());

    let verbose = config.app.environment != Environment::Production;
    let log_format = if verbose {
        "%a \"%r\" %s %b %T"
    } else {
        "%a \"%r\" %s %b %T \"%{Referer}i\" \"%{User-Agent}i\" %{X-Request-ID}o"
    };

    HttpServer::new(move || {
        let cors_origin = app_config.cors_origin.clone();

        App::new()
            .app_data(app_state.clone())
            .app_data(app_config.clone())
            .app_data(url_service.clone())
            .wrap(RequestLogger::new(verbose))
            .wrap(Logger::new(log_format))
            .configure(|cfg| routes::configure_routes::<UrlRepository>(cfg, cors_origin.as_deref()))
    })
    .workers(config.server.workers)
    .bind((config.server.host, config.server.port))?
    .run()
    .await?;

    db.shutdown().await;
    Ok(())
}
