use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wiki_word_freq::{
    http::{router, AppState},
    AnalyzerConfig, Analyzer,
};

#[derive(Parser)]
#[command(name = "wiki-word-freq")]
#[command(about = "Category word-frequency service")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    #[arg(short, long, default_value = "8000")]
    port: u16,

    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Overrides WIKI_CACHE_DIR
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Pages fetched in parallel per analysis, overrides WIKI_CONCURRENCY
    #[arg(long)]
    concurrency: Option<usize>,

    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("wiki_word_freq={filter_level},tower_http={filter_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let mut config = AnalyzerConfig::from_env().context("invalid configuration")?;
    if let Some(cache_dir) = args.cache_dir {
        config.cache_dir = cache_dir;
    }
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency.max(1);
    }

    let analyzer = Analyzer::from_config(&config)
        .await
        .context("failed to initialise analyzer")?;
    let app = router(AppState::new(analyzer));

    let bind_addr = format!("{}:{}", args.host, args.port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind to {bind_addr}"))?;

    info!("Word frequency server started on {}", bind_addr);
    info!("");
    info!("Usage:");
    info!("   curl http://{}/analyze/{{category}}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }
}
