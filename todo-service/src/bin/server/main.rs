use std::sync::Arc;

use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use todo_service::config::Config;
use todo_service::domain::todo::service::TodoService;
use todo_service::domain::user::service::AuthService;
use todo_service::inbound::http::router::cors_layer;
use todo_service::inbound::http::router::create_router;
use todo_service::outbound::repositories::PostgresTodoRepository;
use todo_service::outbound::repositories::PostgresUserRepository;

const MAX_CONNECTIONS: u32 = 5;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "todo-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        cors_origin = config.server.cors_origin.as_deref().unwrap_or("*"),
        token_expiration_minutes = config.token.expiration_minutes,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = MAX_CONNECTIONS,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(
        &config.token.signing_secret(),
        config.token.lifetime(),
    ));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let todo_repository = Arc::new(PostgresTodoRepository::new(pg_pool));

    let auth_service = Arc::new(AuthService::new(user_repository, authenticator));
    let todo_service = Arc::new(TodoService::new(todo_repository));

    let cors = cors_layer(config.server.cors_origin.as_deref())?;
    let http_application = create_router(auth_service, todo_service, cors);

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
