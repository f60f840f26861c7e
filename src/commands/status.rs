//! Status Command Handlers
//!
//! Handles `status`, `inventory`, `empty-drives` and `cleaning-media`.

use super::{blocking, spinner, Context};
use crate::cli::OutputFormat;
use rust_mtx::display;
use rust_mtx::error::Result;
use std::io::{self, Write};
use tracing::info;

pub async fn execute(ctx: &Context, format: OutputFormat) -> Result<()> {
    info!("Reading changer status: {}", ctx.library);

    blocking(&ctx.library, |lib| lib.status()).await?;
    let inventory = ctx.library.info();

    match format {
        OutputFormat::Table => display::display_inventory(&inventory, ctx.library.last_refresh()),
        OutputFormat::Json => writeln!(io::stdout().lock(), "{}", inventory.to_json(true)?)?,
        OutputFormat::Csv => io::stdout().lock().write_all(inventory.to_csv()?.as_bytes())?,
    }

    if let Err(e) = inventory.validate_placement() {
        display::display_warning(&e.to_string());
    }
    Ok(())
}

pub async fn inventory(ctx: &Context) -> Result<()> {
    info!("Starting physical inventory: {}", ctx.library);

    let pb = spinner(format!("Scanning {}", ctx.library));
    let result = blocking(&ctx.library, |lib| lib.inventory()).await;
    pb.finish_and_clear();
    result?;

    println!("Inventory of {} complete", ctx.library);
    Ok(())
}

pub async fn empty_drives(ctx: &Context) -> Result<()> {
    blocking(&ctx.library, |lib| lib.status()).await?;

    let mut drives = ctx.library.info().empty_drives();
    drives.sort_by_key(|id| id.parse::<u64>().unwrap_or(u64::MAX));
    if drives.is_empty() {
        println!("No empty drives");
    }
    for id in drives {
        println!("{}", id);
    }
    Ok(())
}

pub async fn cleaning_media(ctx: &Context) -> Result<()> {
    blocking(&ctx.library, |lib| lib.status()).await?;

    let mut media = ctx.library.info().cleaning_media();
    media.sort_by(|a, b| a.id.cmp(&b.id));
    if media.is_empty() {
        println!("No cleaning media available");
    }
    for vol in media {
        println!("{:<20} slot {}", vol.id, vol.home);
    }
    Ok(())
}
