use clap::Parser;
use stow::config::{Args, Command};
use stow::{Application, Config, scaffold, telemetry};

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI args
    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args)?;

    // If --validate flag is set, exit successfully after config validation
    if args.validate {
        println!("Configuration is valid.");
        return Ok(());
    }

    telemetry::init_telemetry()?;

    // One-shot scaffolding mode
    if let Some(Command::Scaffold { file_name, content, dirs }) = args.command {
        let outcome = scaffold::write_file_to_dirs(&file_name, &content, &dirs);
        tracing::info!(
            written = outcome.written.len(),
            failed = outcome.failed.len(),
            "Scaffolding finished"
        );
        if !outcome.is_success() {
            anyhow::bail!("failed to scaffold {} directories", outcome.failed.len());
        }
        return Ok(());
    }

    // Run the server with graceful shutdown on SIGTERM/Ctrl+C
    let shutdown = shutdown_signal();
    Application::new(config).await?.serve(shutdown).await
}
