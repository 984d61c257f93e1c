use std::time::Duration;

use clap::Parser;
use surveydb::{create_router, QueryGateway, SurveyStore, ValidationMode};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "surveydb")]
#[command(about = "SurveyDB - a read-only query gateway over an imported survey dataset", long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = 5000)]
    port: u16,

    /// SQLite database file (populated by surveydb-load)
    #[arg(long, default_value = "survey.db")]
    db_path: String,

    /// Raw-query screening policy
    #[arg(long, value_enum, default_value = "deny-list")]
    validation_mode: ValidationMode,

    /// Optional raw-query execution-time bound in seconds
    #[arg(long)]
    query_timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "surveydb=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Open the shared store handle once; it lives for the process lifetime.
    let store = SurveyStore::open(&args.db_path)?;
    tracing::info!("Connected to SQLite database at {}", args.db_path);

    let gateway = QueryGateway::new(store, args.validation_mode)
        .with_query_timeout(args.query_timeout.map(Duration::from_secs));
    let app = create_router(gateway);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
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

    tracing::info!("Shutdown signal received");
}
