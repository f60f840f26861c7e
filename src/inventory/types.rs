//! Inventory Type Definitions
//!
//! Data structures describing the elements of a media changer and the
//! volumes occupying them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Tag prefix identifying cleaning cartridges
pub const CLEANING_MEDIA_PREFIX: &str = "CLN";

/// Kind of changer element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SlotKind {
    /// Data transfer element
    Drive,
    /// Storage element
    StorageSlot,
    /// Import/export element
    MailboxSlot,
    #[default]
    Unknown,
}

impl SlotKind {
    pub fn label(&self) -> &'static str {
        match self {
            SlotKind::Drive => "drive",
            SlotKind::StorageSlot => "storage slot",
            SlotKind::MailboxSlot => "mailbox slot",
            SlotKind::Unknown => "slot",
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A media cartridge
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Volume {
    /// Barcode tag, empty when unreadable
    pub id: String,
    /// Storage or mailbox element the volume returns to; empty when unknown
    pub home: String,
    /// Drive currently holding the volume
    pub drive: Option<String>,
}

impl Volume {
    pub fn new<T: Into<String>, H: Into<String>>(id: T, home: H) -> Self {
        Self {
            id: id.into(),
            home: home.into(),
            drive: None,
        }
    }

    pub fn in_drive(&self) -> bool {
        self.drive.is_some()
    }

    pub fn is_cleaning_media(&self) -> bool {
        self.id.starts_with(CLEANING_MEDIA_PREFIX)
    }

    /// Rewrite the location fields for a volume now held by `slot_id`.
    /// A drive keeps the volume's home; any other element becomes its home.
    pub(crate) fn relocate(&mut self, kind: SlotKind, slot_id: &str) {
        match kind {
            SlotKind::Drive => self.drive = Some(slot_id.to_string()),
            _ => {
                self.home = slot_id.to_string();
                self.drive = None;
            }
        }
    }

    /// Human-facing name; unreadable tags fall back to the home element
    pub fn display_name(&self) -> String {
        if self.id.is_empty() {
            format!("<untagged@{}>", self.home)
        } else {
            self.id.clone()
        }
    }
}

/// A physical receptacle of the changer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub kind: SlotKind,
    pub id: String,
    occupant: Option<Volume>,
}

impl Slot {
    pub fn empty<T: Into<String>>(kind: SlotKind, id: T) -> Self {
        Self {
            kind,
            id: id.into(),
            occupant: None,
        }
    }

    pub fn occupied<T: Into<String>>(kind: SlotKind, id: T, volume: Volume) -> Self {
        let mut slot = Self::empty(kind, id);
        slot.insert(volume);
        slot
    }

    pub fn occupant(&self) -> Option<&Volume> {
        self.occupant.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    /// Remove the occupant, leaving the slot record in place.
    pub(crate) fn take(&mut self) -> Option<Volume> {
        self.occupant.take()
    }

    /// Place a volume in this slot. The volume's location fields are
    /// rewritten from the slot, so they can never disagree with it.
    /// Callers check emptiness first; a previous occupant is overwritten.
    pub(crate) fn insert(&mut self, mut volume: Volume) -> &Volume {
        volume.relocate(self.kind, &self.id);
        self.occupant.insert(volume)
    }
}

/// Snapshot of the whole changer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub num_drives: usize,
    pub num_storage_slots: usize,
    pub num_mailbox_slots: usize,
    pub(crate) drives: HashMap<String, Slot>,
    pub(crate) storage_slots: HashMap<String, Slot>,
    pub(crate) mailbox_slots: HashMap<String, Slot>,
}

impl Inventory {
    pub fn drives(&self) -> &HashMap<String, Slot> {
        &self.drives
    }

    pub fn storage_slots(&self) -> &HashMap<String, Slot> {
        &self.storage_slots
    }

    pub fn mailbox_slots(&self) -> &HashMap<String, Slot> {
        &self.mailbox_slots
    }

    /// Every occupied element, drives first.
    pub fn volumes(&self) -> impl Iterator<Item = &Volume> {
        self.drives
            .values()
            .chain(self.storage_slots.values())
            .chain(self.mailbox_slots.values())
            .filter_map(Slot::occupant)
    }

    pub(crate) fn map_mut(&mut self, kind: SlotKind) -> Option<&mut HashMap<String, Slot>> {
        match kind {
            SlotKind::Drive => Some(&mut self.drives),
            SlotKind::StorageSlot => Some(&mut self.storage_slots),
            SlotKind::MailboxSlot => Some(&mut self.mailbox_slots),
            SlotKind::Unknown => None,
        }
    }

    pub(crate) fn drive_mut(&mut self, id: &str) -> Option<&mut Slot> {
        self.drives.get_mut(id)
    }

    /// Storage slot or mailbox slot with the given id, storage first.
    pub(crate) fn resting_slot_mut(&mut self, id: &str) -> Option<&mut Slot> {
        if self.storage_slots.contains_key(id) {
            return self.storage_slots.get_mut(id);
        }
        self.mailbox_slots.get_mut(id)
    }

    /// Resolve a caller-supplied non-drive slot record against the model.
    pub(crate) fn destination_mut(&mut self, slot: &Slot) -> Option<&mut Slot> {
        match slot.kind {
            SlotKind::Unknown => self.resting_slot_mut(&slot.id),
            kind => self.map_mut(kind)?.get_mut(&slot.id),
        }
    }
}

/// Slots of one map in element order (numeric ids first, ascending).
pub fn sorted_slots(map: &HashMap<String, Slot>) -> Vec<&Slot> {
    let mut slots: Vec<&Slot> = map.values().collect();
    slots.sort_by(|a, b| element_order(&a.id).cmp(&element_order(&b.id)));
    slots
}

fn element_order(id: &str) -> (u64, String) {
    (id.parse::<u64>().unwrap_or(u64::MAX), id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_into_drive_keeps_home() {
        let mut drive = Slot::empty(SlotKind::Drive, "1");
        drive.insert(Volume::new("M00003L6", "3"));

        let vol = drive.occupant().unwrap();
        assert_eq!(vol.home, "3");
        assert_eq!(vol.drive.as_deref(), Some("1"));
    }

    #[test]
    fn test_insert_into_storage_rewrites_location() {
        let mut slot = Slot::empty(SlotKind::MailboxSlot, "6");
        let mut vol = Volume::new("M00002L6", "5");
        vol.drive = Some("0".to_string());
        slot.insert(vol);

        let vol = slot.occupant().unwrap();
        assert_eq!(vol.home, "6");
        assert!(!vol.in_drive());
    }

    #[test]
    fn test_take_leaves_slot_record() {
        let mut slot = Slot::occupied(SlotKind::StorageSlot, "4", Volume::new("CLN004L6", "4"));
        let vol = slot.take().unwrap();
        assert!(vol.is_cleaning_media());
        assert!(slot.is_empty());
        assert_eq!(slot.kind, SlotKind::StorageSlot);
        assert_eq!(slot.id, "4");
    }

    #[test]
    fn test_sorted_slots_numeric_order() {
        let mut map = HashMap::new();
        for id in ["10", "2", "1"] {
            map.insert(id.to_string(), Slot::empty(SlotKind::StorageSlot, id));
        }
        let ids: Vec<&str> = sorted_slots(&map).iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "10"]);
    }

    #[test]
    fn test_cleaning_prefix_is_anchored() {
        assert!(Volume::new("CLN001L1", "1").is_cleaning_media());
        assert!(!Volume::new("M0CLN1L6", "1").is_cleaning_media());
    }
}
