use anyhow::Result;
use axum::http::{header, HeaderValue, Method};
use clap::Parser;
use dotenv::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use explorer_api::{
    api::create_router,
    config::{validate_settings, ApplicationSettings, Settings},
    frontend,
    metrics,
    DaemonRpcClient,
};

#[derive(Parser)]
struct Args {
    /// Configuration file, without extension
    #[arg(long, default_value = "config")]
    config: String,

    /// Verbose logging, overrides application.debug
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let args = Args::parse();

    // Load configuration
    let mut settings = Settings::load(&args.config).unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {:?}", e);
        std::process::exit(1);
    });
    settings.application.debug |= args.debug;

    // Initialize tracing
    let default_level = if settings.application.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = validate_settings(&settings) {
        error!("Invalid configuration: {:?}", e);
        std::process::exit(1);
    }

    info!("Loaded settings: {:?}", settings);

    // Set up metrics
    let prometheus_handle = metrics::setup_metrics_recorder()?;
    info!("Prometheus metrics initialized");

    let client = DaemonRpcClient::new(&settings.daemon)?;
    info!("Forwarding API requests to daemon at {}", client.endpoint());

    let router = create_router(Arc::new(client))
        .route("/metrics", axum::routing::get(move || async move {
            let metrics = prometheus_handle.render();
            (
                [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4")],
                metrics,
            )
        }));

    let app = frontend::with_frontend(router, &settings.frontend)
        .layer(cors_layer(&settings.application));

    let addr = SocketAddr::from((
        settings.application.host.parse::<std::net::IpAddr>().unwrap_or_else(|_| [0, 0, 0, 0].into()),
        settings.application.port,
    ));

    let listener = TcpListener::bind(addr).await?;
    info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Explorer API stopped");
    Ok(())
}

fn cors_layer(settings: &ApplicationSettings) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(settings.cors_allow_origin.parse::<HeaderValue>().unwrap_or_else(|_| {
            HeaderValue::from_static("*")
        }))
        .allow_methods(
            settings.cors_allow_methods
                .split(',')
                .map(|s| s.trim().parse::<Method>().unwrap_or(Method::GET))
                .collect::<Vec<Method>>()
        )
        .allow_headers(
            settings.cors_allow_headers
                .split(',')
                .map(|s| match s.trim().to_lowercase().as_str() {
                    "content-type" => header::CONTENT_TYPE,
                    _ => header::HeaderName::from_lowercase(s.trim().to_lowercase().as_bytes()).unwrap_or(header::CONTENT_TYPE),
                })
                .collect::<Vec<_>>()
        )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
