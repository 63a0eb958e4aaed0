//! SkyCast HTTP Server
//!
//! Main entry point for the weather lookup API server.

use std::{sync::Arc, time::Duration};

use application::{
    GeoResolver, WeatherLookupService,
    ports::{GeocodingPort, SecretStorePort, WeatherPort},
    services::CredentialProvider,
};
use infrastructure::{
    AppConfig, ChainedSecretStore, EnvSecretStore, MokaCache, MokaCacheConfig, OpenWeatherAdapter,
    VaultSecretStore,
};
use integration_openweather::OpenWeatherClient;
use presentation_http::{AppState, cors_layer, create_router, set_expose_internal_errors};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration before tracing so the log format can honor it
    let config_result = AppConfig::load();
    let config = config_result.as_ref().ok().cloned().unwrap_or_default();

    init_tracing(&config.server.log_format);

    info!("SkyCast v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Err(e) = &config_result {
        tracing::warn!("Failed to load config, using defaults: {e}");
    }

    info!(
        environment = %config.environment,
        host = %config.server.host,
        port = %config.server.port,
        units = %config.openweather.units,
        "Configuration loaded"
    );

    if config.environment.is_production() {
        set_expose_internal_errors(false);
    }

    // Secret store: Vault first when enabled, environment as fallback
    let env_store: Arc<dyn SecretStorePort> = Arc::new(EnvSecretStore::new());
    let secret_store: Arc<dyn SecretStorePort> = if config.vault.enabled {
        let vault = VaultSecretStore::new(&config.vault.connection())
            .map_err(|e| anyhow::anyhow!("Failed to initialize Vault: {e}"))?;
        Arc::new(ChainedSecretStore::new(vec![Arc::new(vault), env_store]))
    } else {
        env_store
    };

    // Credential is fetched lazily on the first lookup
    let credentials = Arc::new(CredentialProvider::new(
        Arc::clone(&secret_store),
        config.openweather.secret_path.clone(),
        config.openweather.api_key_field.clone(),
    ));

    let client = OpenWeatherClient::new(config.openweather.client_config())
        .map_err(|e| anyhow::anyhow!("Failed to initialize OpenWeatherMap client: {e}"))?;
    let adapter = Arc::new(OpenWeatherAdapter::new(client, credentials));

    // Two independent caches: geo entries never expire, weather entries do
    let geo_cache = Arc::new(MokaCache::with_config(MokaCacheConfig {
        max_capacity_mb: config.cache.max_capacity_mb,
        time_to_live: None,
    }));
    let weather_cache = Arc::new(MokaCache::with_config(MokaCacheConfig {
        max_capacity_mb: config.cache.max_capacity_mb,
        time_to_live: Some(config.cache.weather_ttl()),
    }));

    let geo_resolver = GeoResolver::new(
        Arc::clone(&adapter) as Arc<dyn GeocodingPort>,
        geo_cache,
    );
    let lookup_service = WeatherLookupService::new(
        geo_resolver,
        adapter as Arc<dyn WeatherPort>,
        weather_cache,
    )
    .with_snapshot_ttl(config.cache.weather_ttl());

    let config = Arc::new(config);
    let state = AppState {
        lookup_service: Arc::new(lookup_service),
        secret_store,
        config: Arc::clone(&config),
    };

    // Build router with middleware (first added = outermost)
    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.server.allowed_origins));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);

    let shutdown_timeout =
        Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Initialize the tracing subscriber with the configured format
fn init_tracing(log_format: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "skycast_server=info,presentation_http=info,application=info".into());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        // Log error but continue waiting - this is a best-effort signal handler
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
    // The actual connection draining is handled by axum's graceful_shutdown
}
