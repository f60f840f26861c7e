//! Inventory Lookups
//!
//! Read-only queries over an [`Inventory`] snapshot.

use crate::error::{Result, RustMtxError};
use super::types::*;

impl Inventory {
    /// Drive element by id
    pub fn drive(&self, id: &str) -> Result<&Slot> {
        self.drives
            .get(id)
            .ok_or_else(|| RustMtxError::not_found("drive", id))
    }

    /// Storage element by id
    pub fn storage_slot(&self, id: &str) -> Result<&Slot> {
        self.storage_slots
            .get(id)
            .ok_or_else(|| RustMtxError::not_found("storage slot", id))
    }

    /// Import/export element by id
    pub fn mailbox_slot(&self, id: &str) -> Result<&Slot> {
        self.mailbox_slots
            .get(id)
            .ok_or_else(|| RustMtxError::not_found("mailbox slot", id))
    }

    /// Ids of drives with nothing loaded, in no particular order.
    pub fn empty_drives(&self) -> Vec<String> {
        self.drives
            .values()
            .filter(|slot| slot.is_empty())
            .map(|slot| slot.id.clone())
            .collect()
    }

    /// Cleaning cartridges resting in storage or mailbox slots.
    /// Cartridges currently loaded in a drive are never returned.
    pub fn cleaning_media(&self) -> Vec<Volume> {
        self.storage_slots
            .values()
            .chain(self.mailbox_slots.values())
            .filter_map(Slot::occupant)
            .filter(|vol| vol.is_cleaning_media())
            .cloned()
            .collect()
    }

    /// The slot a volume returns to: storage slots first, then mailboxes.
    pub fn home_slot(&self, volume: &Volume) -> Result<&Slot> {
        self.storage_slots
            .get(&volume.home)
            .or_else(|| self.mailbox_slots.get(&volume.home))
            .ok_or_else(|| RustMtxError::not_found("home slot", volume.home.as_str()))
    }

    /// Storage or mailbox slot by id, storage first.
    pub fn resting_slot(&self, id: &str) -> Result<&Slot> {
        self.storage_slots
            .get(id)
            .or_else(|| self.mailbox_slots.get(id))
            .ok_or_else(|| RustMtxError::not_found("storage or mailbox slot", id))
    }

    /// First volume carrying the tag, searching drives, storage, then mailboxes.
    pub fn find_volume(&self, tag: &str) -> Result<&Volume> {
        if tag.is_empty() {
            return Err(RustMtxError::not_found("volume", tag));
        }
        self.volumes()
            .find(|vol| vol.id == tag)
            .ok_or_else(|| RustMtxError::not_found("volume", tag))
    }
}
