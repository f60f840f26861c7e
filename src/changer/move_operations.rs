//! Move Operations
//!
//! Load, unload, transfer and cleaning-cartridge loads. Each operation
//! checks its preconditions, drives the changer, and only then updates the
//! stored inventory. Before the first refresh only the caller's records can
//! be checked; the command is still sent and the model is left alone.

use crate::error::{Result, RustMtxError};
use crate::inventory::{Inventory, Slot, SlotKind, Volume};
use super::core::{Library, LibraryState};
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

impl Library {
    /// Move a volume from its home slot into an empty drive.
    /// Returns the volume as it is now placed.
    pub fn load(&self, volume: &Volume, drive: &Slot) -> Result<Volume> {
        let mut state = self.lock_state();
        self.load_locked(&mut state, volume, drive)
            .map_err(|e| e.in_operation("load"))
    }

    /// Load a randomly chosen cleaning cartridge into a drive.
    ///
    /// The choice is uniform over every cleaning cartridge resting in a
    /// storage or mailbox slot so that wear spreads across all of them.
    pub fn load_cleaning_media(&self, drive: &Slot) -> Result<Volume> {
        let mut state = self.lock_state();
        let candidates = state
            .inventory
            .as_ref()
            .map(Inventory::cleaning_media)
            .unwrap_or_default();

        let volume = candidates
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or(RustMtxError::NoCleaningMediaAvailable)
            .map_err(|e| e.in_operation("loadcln"))?;
        debug!(
            "{}: picked cleaning cartridge {} of {} candidates",
            self.device(),
            volume.id,
            candidates.len()
        );

        self.load_locked(&mut state, &volume, drive)
            .map_err(|e| e.in_operation("loadcln"))
    }

    /// Return a volume from its drive to its home slot.
    pub fn unload(&self, volume: &Volume) -> Result<Volume> {
        let mut state = self.lock_state();
        self.unload_locked(&mut state, volume)
            .map_err(|e| e.in_operation("unload"))
    }

    /// Move a volume from its home slot to another storage or mailbox
    /// slot, which becomes its new home.
    pub fn transfer(&self, volume: &Volume, destination: &Slot) -> Result<Volume> {
        let mut state = self.lock_state();
        self.transfer_locked(&mut state, volume, destination)
            .map_err(|e| e.in_operation("transfer"))
    }

    fn load_locked(&self, state: &mut LibraryState, volume: &Volume, drive: &Slot) -> Result<Volume> {
        match state.inventory.as_ref() {
            Some(inv) => {
                if !inv.drive(&drive.id)?.is_empty() {
                    return Err(RustMtxError::DriveNotAvailable {
                        drive: drive.id.clone(),
                        volume: volume.display_name(),
                    });
                }
            }
            None if !drive.is_empty() => {
                return Err(RustMtxError::DriveNotAvailable {
                    drive: drive.id.clone(),
                    volume: volume.display_name(),
                });
            }
            None => {}
        }

        if let Some(current) = &volume.drive {
            return Err(RustMtxError::VolumeAlreadyInDrive {
                volume: volume.display_name(),
                drive: current.clone(),
            });
        }
        if volume.home.is_empty() {
            return Err(RustMtxError::NoHomeSlot {
                volume: volume.display_name(),
            });
        }
        if let Some(inv) = state.inventory.as_ref() {
            if let Some(mounted) = mounted_copy(inv, volume) {
                return Err(RustMtxError::VolumeAlreadyInDrive {
                    volume: volume.display_name(),
                    drive: mounted.drive.clone().unwrap_or_default(),
                });
            }
            check_source(inv.home_slot(volume)?, volume)?;
        }

        self.run(&["load", &volume.home, &drive.id])?;
        info!(
            "{}: loaded {} from slot {} into drive {}",
            self.device(),
            volume.display_name(),
            volume.home,
            drive.id
        );

        let Some(inv) = state.inventory.as_mut() else {
            debug!("{}: inventory not populated, model not updated", self.device());
            let mut placed = volume.clone();
            placed.relocate(SlotKind::Drive, &drive.id);
            return Ok(placed);
        };

        let moving = take_source(inv.resting_slot_mut(&volume.home), volume)?;
        let target = inv.drive_mut(&drive.id).ok_or_else(|| {
            RustMtxError::inconsistent(format!("drive {} vanished during load", drive.id))
        })?;
        Ok(target.insert(moving).clone())
    }

    fn unload_locked(&self, state: &mut LibraryState, volume: &Volume) -> Result<Volume> {
        let Some(drive_id) = volume.drive.as_deref() else {
            return Err(RustMtxError::VolumeNotInDrive {
                volume: volume.display_name(),
            });
        };
        if volume.home.is_empty() {
            return Err(RustMtxError::NoHomeSlot {
                volume: volume.display_name(),
            });
        }

        if let Some(inv) = state.inventory.as_ref() {
            let drive = inv.drive(drive_id)?;
            if drive.is_empty() {
                return Err(RustMtxError::VolumeNotInDrive {
                    volume: volume.display_name(),
                });
            }
            check_source(drive, volume)?;
            let home = inv.home_slot(volume).map_err(|_| RustMtxError::NoHomeSlot {
                volume: volume.display_name(),
            })?;
            if !home.is_empty() {
                return Err(RustMtxError::SlotNotAvailable {
                    slot: home.id.clone(),
                    volume: volume.display_name(),
                });
            }
        }

        self.run(&["unload", &volume.home, drive_id])?;
        info!(
            "{}: unloaded {} from drive {} to slot {}",
            self.device(),
            volume.display_name(),
            drive_id,
            volume.home
        );

        let Some(inv) = state.inventory.as_mut() else {
            debug!("{}: inventory not populated, model not updated", self.device());
            let mut placed = volume.clone();
            placed.drive = None;
            return Ok(placed);
        };

        let moving = take_source(inv.drive_mut(drive_id), volume)?;
        let home = inv.resting_slot_mut(&volume.home).ok_or_else(|| {
            RustMtxError::inconsistent(format!("slot {} vanished during unload", volume.home))
        })?;
        Ok(home.insert(moving).clone())
    }

    fn transfer_locked(
        &self,
        state: &mut LibraryState,
        volume: &Volume,
        destination: &Slot,
    ) -> Result<Volume> {
        if let Some(current) = &volume.drive {
            return Err(RustMtxError::VolumeAlreadyInDrive {
                volume: volume.display_name(),
                drive: current.clone(),
            });
        }
        if destination.kind == SlotKind::Drive {
            return Err(RustMtxError::InvalidDestination(format!(
                "cannot transfer {} into drive {}, load it instead",
                volume.display_name(),
                destination.id
            )));
        }
        if volume.home.is_empty() {
            return Err(RustMtxError::NoHomeSlot {
                volume: volume.display_name(),
            });
        }

        let dest_occupied = match state.inventory.as_ref() {
            Some(inv) => {
                check_source(inv.resting_slot(&volume.home)?, volume)?;
                let dest = match destination.kind {
                    SlotKind::StorageSlot => inv.storage_slot(&destination.id)?,
                    SlotKind::MailboxSlot => inv.mailbox_slot(&destination.id)?,
                    _ => inv.resting_slot(&destination.id)?,
                };
                !dest.is_empty() && dest.id != volume.home
            }
            None => !destination.is_empty(),
        };
        if dest_occupied {
            return Err(RustMtxError::SlotNotAvailable {
                slot: destination.id.clone(),
                volume: volume.display_name(),
            });
        }

        self.run(&["transfer", &volume.home, &destination.id])?;
        info!(
            "{}: transferred {} from slot {} to slot {}",
            self.device(),
            volume.display_name(),
            volume.home,
            destination.id
        );

        let Some(inv) = state.inventory.as_mut() else {
            debug!("{}: inventory not populated, model not updated", self.device());
            let mut placed = volume.clone();
            placed.relocate(destination.kind, &destination.id);
            return Ok(placed);
        };

        let moving = take_source(inv.resting_slot_mut(&volume.home), volume)?;
        let target = inv.destination_mut(destination).ok_or_else(|| {
            RustMtxError::inconsistent(format!(
                "slot {} vanished during transfer",
                destination.id
            ))
        })?;
        Ok(target.insert(moving).clone())
    }
}

/// A drive already holding a volume with the same readable tag.
fn mounted_copy<'a>(inv: &'a Inventory, volume: &Volume) -> Option<&'a Volume> {
    if volume.id.is_empty() {
        return None;
    }
    inv.drives()
        .values()
        .filter_map(Slot::occupant)
        .find(|mounted| mounted.id == volume.id)
}

/// The model must hold the caller's volume at the move source. An untagged
/// record matches whatever the slot holds.
fn check_source(slot: &Slot, volume: &Volume) -> Result<()> {
    match slot.occupant() {
        None => Err(RustMtxError::not_found("volume in slot", slot.id.as_str())),
        Some(held) if !volume.id.is_empty() && held.id != volume.id => Err(RustMtxError::not_found(
            "volume",
            format!("{} in {} {}", volume.display_name(), slot.kind.label(), slot.id),
        )),
        Some(_) => Ok(()),
    }
}

/// Pull the occupant out of a source slot already passed by `check_source`.
fn take_source(source: Option<&mut Slot>, record: &Volume) -> Result<Volume> {
    let vol = source.and_then(Slot::take).ok_or_else(|| {
        RustMtxError::inconsistent(format!(
            "source of {} emptied during the move",
            record.display_name()
        ))
    })?;
    if vol.id != record.id {
        warn!(
            "source held {} while caller named {}",
            vol.display_name(),
            record.display_name()
        );
    }
    Ok(vol)
}
