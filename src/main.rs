use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ideaforge::api;
use ideaforge::config::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                "ideaforge=debug,ideaforge_core=debug,tower_http=debug".into()
            }),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.into_command() {
        Commands::Serve(args) => {
            let addr = args.socket_addr()?;
            tracing::info!("Starting IdeaForge server on {}", addr);

            let db = args.database.open()?;
            let app = api::create_router(db);

            let listener = tokio::net::TcpListener::bind(addr).await?;
            tracing::info!("IdeaForge server listening on http://{}", addr);

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
            tracing::info!("IdeaForge server stopped");
        }
        Commands::Migrate(args) => {
            args.open()?;
            println!("Database schema is up to date");
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
