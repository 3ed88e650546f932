use library_lending::{
    adapters::{
        memory::MemoryStore,
        password_hasher::Argon2PasswordHasher,
        postgres::{PostgresBookRepository, PostgresBorrowLedger, PostgresUserRepository},
    },
    api::{handlers::AppState, router::create_router},
    application::lending::ServiceDependencies,
    config::AppConfig,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "library_lending=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let password_hasher = Arc::new(Argon2PasswordHasher::new());

    // Initialize adapters
    let service_deps = match &config.database_url {
        Some(database_url) => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(database_url)
                .await?;

            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Connected to PostgreSQL and applied migrations");

            ServiceDependencies {
                users: Arc::new(PostgresUserRepository::new(pool.clone())),
                books: Arc::new(PostgresBookRepository::new(pool.clone())),
                borrow_ledger: Arc::new(PostgresBorrowLedger::new(pool)),
                password_hasher,
            }
        }
        None => {
            tracing::warn!("DATABASE_URL is not set; data will be kept in memory only");
            let store = Arc::new(MemoryStore::new());

            ServiceDependencies {
                users: store.clone(),
                books: store.clone(),
                borrow_ledger: store,
                password_hasher,
            }
        }
    };

    // Create application state
    let app_state = Arc::new(AppState { service_deps });

    // Create router
    let app = create_router(app_state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
