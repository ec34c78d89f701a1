//! Pipeline Inspector - Main entry point.
//!
//! Starts the Actix-web server with configured routes and middleware.

use actix_cors::Cors;
use actix_web::{App, HttpServer, http::header, web};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use pipeline_inspector_lib::config::{Config, USER_HEADER};
use pipeline_inspector_lib::db::DbPool;
use pipeline_inspector_lib::{api, middleware};

/// Perform health check (for Docker healthcheck).
fn health_check() -> bool {
    Config::from_env().is_ok()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Check for --health-check flag (used by Docker HEALTHCHECK)
    if std::env::args().any(|arg| arg == "--health-check") {
        dotenvy::dotenv().ok();
        std::process::exit(if health_check() { 0 } else { 1 });
    }

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - In production, DATABASE_URL must be set to a non-default value");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  Pipeline Inspector");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
    }

    let pool = match DbPool::new(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };
    info!("Database connection established");

    if let Err(e) = pool.run_migrations().await {
        error!("Failed to run migrations: {}", e);
        std::process::exit(1);
    }

    let bind_address = config.bind_address();
    let is_development = config.is_development();

    let worker_count = if is_development {
        info!(
            "Starting server at http://{} (4 workers - development mode)",
            bind_address
        );
        4
    } else {
        let cpus = num_cpus::get();
        info!("Starting server at http://{} ({} workers)", bind_address, cpus);
        cpus
    };

    let server = HttpServer::new(move || {
        let cors = if is_development {
            // Permissive CORS for a local front end
            Cors::default()
                .allowed_origin("http://localhost:3000")
                .allowed_origin("http://127.0.0.1:3000")
        } else {
            // Same-origin only
            Cors::default()
        }
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .allowed_header(USER_HEADER)
        .max_age(3600);

        App::new()
            // CORS must wrap before other middleware
            .wrap(cors)
            .wrap(middleware::RequestLogger)
            .app_data(web::Data::new(pool.clone()))
            .service(web::scope("/api/v1").configure(api::configure_routes))
    });

    server.workers(worker_count).bind(&bind_address)?.run().await
}
