//! Inventory Validation
//!
//! Placement invariants and summary/element consistency checks.

use crate::error::{Result, RustMtxError};
use super::types::*;
use std::collections::HashMap;

impl Inventory {
    /// Verify that every occupant agrees with the slot holding it and that
    /// no readable tag occupies more than one slot.
    pub fn validate_placement(&self) -> Result<()> {
        for slot in self.drives.values() {
            if let Some(vol) = slot.occupant() {
                if vol.drive.as_deref() != Some(slot.id.as_str()) {
                    return Err(RustMtxError::inconsistent(format!(
                        "volume {} in drive {} records drive {:?}",
                        vol.display_name(),
                        slot.id,
                        vol.drive
                    )));
                }
            }
        }

        for slot in self.storage_slots.values().chain(self.mailbox_slots.values()) {
            if let Some(vol) = slot.occupant() {
                if vol.drive.is_some() || vol.home != slot.id {
                    return Err(RustMtxError::inconsistent(format!(
                        "volume {} in {} {} records home {:?}, drive {:?}",
                        vol.display_name(),
                        slot.kind,
                        slot.id,
                        vol.home,
                        vol.drive
                    )));
                }
            }
        }

        let mut seen: HashMap<&str, usize> = HashMap::new();
        for vol in self.volumes().filter(|v| !v.id.is_empty()) {
            *seen.entry(vol.id.as_str()).or_default() += 1;
        }
        if let Some((tag, count)) = seen.into_iter().find(|(_, count)| *count > 1) {
            return Err(RustMtxError::inconsistent(format!(
                "volume {} occupies {} slots",
                tag, count
            )));
        }

        Ok(())
    }

    /// Differences between the summary counts and the element lines parsed.
    pub fn count_discrepancies(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let checks = [
            ("drives", self.num_drives, self.drives.len()),
            ("storage slots", self.num_storage_slots, self.storage_slots.len()),
            ("mailbox slots", self.num_mailbox_slots, self.mailbox_slots.len()),
        ];
        for (what, reported, parsed) in checks {
            if reported != parsed {
                issues.push(format!(
                    "summary reports {} {} but {} were listed",
                    reported, what, parsed
                ));
            }
        }
        issues
    }
}
