use std::sync::Arc;

use color_eyre::eyre::Result;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use warden_adapters::{
    AppState, DataStore, JwtConfig, JwtTokenAuthority, PostgresUserStore, RedisSessionStore,
    RedisUserStore, Settings, router,
};
use warden_application::AuthService;
use warden_core::{HealthProbe, SessionStore, TokenAuthority, UserStore};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    // Fails here with a non-zero exit when JWT_SECRET or DATASTORE is absent.
    let settings = Settings::load()?;

    // Sessions live in Redis regardless of the user-store selection.
    let redis_client = redis::Client::open(settings.redis.url())?;
    let redis_conn = redis_client.get_multiplexed_async_connection().await?;

    let session_store: Arc<dyn SessionStore> =
        Arc::new(RedisSessionStore::new(redis_conn.clone()));

    // The user-store backend is a process-wide static choice made once here.
    let (user_store, probe): (Arc<dyn UserStore>, Arc<dyn HealthProbe>) = match settings.datastore
    {
        DataStore::Relational => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(settings.postgres.url().expose_secret())
                .await?;
            sqlx::migrate!().run(&pool).await?;

            let store = Arc::new(PostgresUserStore::new(pool));
            tracing::info!("Using the relational user store");
            (store.clone() as Arc<dyn UserStore>, store)
        }
        DataStore::KeyValue => {
            let store = Arc::new(RedisUserStore::new(redis_conn));
            tracing::info!("Using the key-value user store");
            (store.clone() as Arc<dyn UserStore>, store)
        }
    };

    let tokens: Arc<dyn TokenAuthority> = Arc::new(JwtTokenAuthority::new(JwtConfig {
        secret: settings.jwt_secret.clone(),
        ttl_seconds: settings.token_ttl_seconds,
    }));

    let auth = Arc::new(AuthService::new(
        user_store,
        session_store.clone(),
        tokens.clone(),
        settings.token_ttl_seconds as u64,
    ));

    let state = AppState {
        auth,
        sessions: session_store,
        tokens,
        probe,
    };

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", settings.port)).await?;
    tracing::info!("Auth API listening on port {}", settings.port);

    axum::serve(listener, router(state)).await?;

    Ok(())
}

fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
