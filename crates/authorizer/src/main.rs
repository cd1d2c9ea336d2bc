//! Gateway Token Authorizer
//!
//! Entry point for the authorizer service. Wires the signing-key cache,
//! JWKS client, token verifier, and decision builder behind the HTTP
//! surface consumed by the request-routing layer.

use authorizer::auth::jwks::JwksClient;
use authorizer::auth::keys::KeyResolver;
use authorizer::auth::TokenVerifier;
use authorizer::cache::MemoryKeyCache;
use authorizer::config::Config;
use authorizer::notify::LogNotifier;
use authorizer::routes::{self, AppState};
use authorizer::services::{AuthenticationService, DecisionService};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "authorizer=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting gateway token authorizer");

    // Load configuration
    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!(
        bind_address = %config.bind_address,
        idp_domain = %config.idp_domain,
        jwks_url = %config.jwks_url,
        jwt_clock_skew_seconds = config.jwt_clock_skew_seconds,
        "Configuration loaded successfully"
    );

    // Wire the authentication chain: cache -> resolver -> verifier
    let cache = Arc::new(MemoryKeyCache::new());
    let resolver = KeyResolver::new(cache, JwksClient::new(config.jwks_url.clone()));
    let verifier = TokenVerifier::new(
        resolver,
        config.expected_claims(),
        config.jwt_clock_skew_seconds,
    );
    let decision = DecisionService::new(
        AuthenticationService::new(verifier),
        Arc::new(LogNotifier),
    );

    let bind_address = config.bind_address.clone();
    let state = Arc::new(AppState { decision });
    let app = routes::build_routes(state);

    let addr: SocketAddr = bind_address.parse().map_err(|e| {
        error!("Invalid bind address: {}", e);
        e
    })?;

    info!("Authorizer listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Authorizer shutdown complete");

    Ok(())
}

/// Listens for shutdown signals (SIGTERM, SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received SIGINT, starting graceful shutdown..."),
            Err(e) => error!("Failed to listen for SIGINT: {}", e),
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received SIGTERM, starting graceful shutdown...");
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
