use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use readstash::app::AppContext;
use readstash::cli::{commands, Cli, Commands};
use readstash::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let ctx = AppContext::new(&config);

    ctx.sync_user_once().await;

    match cli.command {
        Commands::Save { url, no_wait } => {
            commands::save(&ctx, &url, !no_wait).await?;
        }
        Commands::Status { id } => {
            commands::status(&ctx, id.as_deref()).await?;
        }
        Commands::Show { id } => {
            commands::show(&ctx, id.as_deref()).await?;
        }
        Commands::Today => {
            commands::today(&ctx).await?;
        }
        Commands::Library => {
            commands::library(&ctx).await?;
        }
        Commands::Tui => {
            readstash::tui::run(Arc::new(ctx)).await?;
        }
    }

    Ok(())
}
