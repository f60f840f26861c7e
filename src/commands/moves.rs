//! Move Command Handlers
//!
//! Handles `load`, `unload`, `transfer` and `clean`. With
//! `refresh_before_move` enabled the records come from a fresh status
//! report; otherwise they are built from the ids given on the command line.

use super::{blocking, spinner, Context};
use rust_mtx::display;
use rust_mtx::error::{Result, RustMtxError};
use rust_mtx::{Slot, SlotKind, Volume};
use tracing::info;

pub async fn load(ctx: &Context, slot: String, drive: String) -> Result<()> {
    info!("Loading slot {} into drive {}", slot, drive);
    let refresh = ctx.config.refresh_before_move;

    let pb = spinner(format!("Loading slot {} into drive {}", slot, drive));
    let result = blocking(&ctx.library, move |lib| {
        let (volume, target) = if refresh {
            lib.status()?;
            let inv = lib.info();
            let volume = inv
                .resting_slot(&slot)?
                .occupant()
                .cloned()
                .ok_or_else(|| RustMtxError::parameter_validation(format!("slot {} is empty", slot)))?;
            (volume, inv.drive(&drive)?.clone())
        } else {
            (
                Volume::new("", slot.as_str()),
                Slot::empty(SlotKind::Drive, drive.as_str()),
            )
        };
        lib.load(&volume, &target)
    })
    .await;
    pb.finish_and_clear();

    display::display_move("Loaded", &result?);
    Ok(())
}

pub async fn unload(ctx: &Context, drive: String, slot: Option<String>) -> Result<()> {
    info!("Unloading drive {}", drive);
    let refresh = ctx.config.refresh_before_move;

    let pb = spinner(format!("Unloading drive {}", drive));
    let result = blocking(&ctx.library, move |lib| {
        let mut volume = if refresh {
            lib.status()?;
            lib.info()
                .drive(&drive)?
                .occupant()
                .cloned()
                .ok_or_else(|| RustMtxError::parameter_validation(format!("drive {} is empty", drive)))?
        } else {
            let mut vol = Volume::new("", "");
            vol.drive = Some(drive.clone());
            vol
        };
        if let Some(slot) = slot {
            volume.home = slot;
        }
        lib.unload(&volume)
    })
    .await;
    pb.finish_and_clear();

    display::display_move("Unloaded", &result?);
    Ok(())
}

pub async fn transfer(ctx: &Context, source: String, destination: String) -> Result<()> {
    info!("Transferring slot {} to slot {}", source, destination);
    let refresh = ctx.config.refresh_before_move;

    let pb = spinner(format!("Transferring slot {} to slot {}", source, destination));
    let result = blocking(&ctx.library, move |lib| {
        let (volume, target) = if refresh {
            lib.status()?;
            let inv = lib.info();
            let volume = inv
                .resting_slot(&source)?
                .occupant()
                .cloned()
                .ok_or_else(|| RustMtxError::parameter_validation(format!("slot {} is empty", source)))?;
            (volume, inv.resting_slot(&destination)?.clone())
        } else {
            (
                Volume::new("", source.as_str()),
                Slot::empty(SlotKind::Unknown, destination.as_str()),
            )
        };
        lib.transfer(&volume, &target)
    })
    .await;
    pb.finish_and_clear();

    display::display_move("Transferred", &result?);
    Ok(())
}

/// Cleaning cartridges are found from the inventory, so this always refreshes.
pub async fn clean(ctx: &Context, drive: String) -> Result<()> {
    info!("Loading cleaning media into drive {}", drive);

    let pb = spinner(format!("Loading cleaning media into drive {}", drive));
    let result = blocking(&ctx.library, move |lib| {
        lib.status()?;
        let target = lib.info().drive(&drive)?.clone();
        lib.load_cleaning_media(&target)
    })
    .await;
    pb.finish_and_clear();

    display::display_move("Loaded cleaning media", &result?);
    Ok(())
}
