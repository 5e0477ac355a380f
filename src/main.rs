use actix_web::middleware::NormalizePath;
use actix_web::{App, HttpServer};
use anyhow::Context;
use simple_banking::config;
use simple_banking::metrics::{AppMetrics, MetricsMiddleware};
use simple_banking::security::{self, PasswordHasher, SecurityHeadersMiddleware};
use simple_banking::{AppState, database, observability, router};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load().context("Failed to load configuration")?;

    observability::init(&config.observability);

    ::tracing::info!(
        name = %config.app.name,
        version = %config.app.version,
        environment = %config.app.environment,
        "Starting service"
    );

    let db = database::connect(&config.database)
        .await
        .context("Failed to connect to database")?;

    let hasher = PasswordHasher::from_config(&config.auth.argon2)
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 parameters: {}", e))?;

    let metrics = AppMetrics::with_metadata(Some(&config.app));
    let state = AppState::new(db, config.auth.clone(), hasher, metrics.clone());

    let cors = config.security.cors.clone();
    let headers = config.security.headers.clone();
    let api = config.api.clone();

    let mut server = HttpServer::new(move || {
        let mut app = App::new()
            .wrap(NormalizePath::trim())
            .wrap(MetricsMiddleware::new(metrics.clone()))
            .wrap(SecurityHeadersMiddleware::new(headers.clone()))
            .wrap(security::cors(&cors))
            .configure(|app| state.configure(app))
            .configure(router::route);

        if api.swagger_enabled {
            app = app.configure(router::docs(&api.swagger_path));
        }

        app
    })
    .shutdown_timeout(config.app.shutdown_timeout);

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let address = (config.server.host.as_str(), config.server.port);

    ::tracing::info!(host = %address.0, port = address.1, "Listening");

    server
        .bind(address)
        .with_context(|| format!("Failed to bind {}:{}", address.0, address.1))?
        .run()
        .await
        .context("Server terminated with an error")
}
