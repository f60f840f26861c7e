mod cli;
mod commands;

use crate::cli::{Cli, Commands};
use anyhow::{Context as _, Result};
use rust_mtx::logger;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse_args();

    // Initialize logging system
    logger::init(args.verbose).context("failed to initialise logging")?;

    debug!("RustMTX CLI starting");

    match run(args).await {
        Ok(_) => {
            info!("Operation completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Operation failed: {:#}", e);
            std::process::exit(1);
        }
    }
}

async fn run(args: Cli) -> Result<()> {
    let ctx = commands::Context::open(args.config.as_deref(), args.device, args.mtx_command)
        .context("cannot open changer")?;

    match args.command {
        Commands::Status { format } => commands::status::execute(&ctx, format).await?,

        Commands::Inventory => commands::status::inventory(&ctx).await?,

        Commands::Load { slot, drive } => commands::moves::load(&ctx, slot, drive).await?,

        Commands::Unload { drive, slot } => commands::moves::unload(&ctx, drive, slot).await?,

        Commands::Transfer {
            source,
            destination,
        } => commands::moves::transfer(&ctx, source, destination).await?,

        Commands::Clean { drive } => commands::moves::clean(&ctx, drive).await?,

        Commands::EmptyDrives => commands::status::empty_drives(&ctx).await?,

        Commands::CleaningMedia => commands::status::cleaning_media(&ctx).await?,
    }
    Ok(())
}
