//! Inventory Export
//!
//! JSON and CSV renderings of an inventory snapshot.

use crate::error::{Result, RustMtxError};
use super::types::*;

impl Inventory {
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// One row per element: drives, storage slots, then mailboxes.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(["kind", "slot", "volume", "home", "drive"])
            .map_err(csv_error)?;

        for map in [&self.drives, &self.storage_slots, &self.mailbox_slots] {
            for slot in sorted_slots(map) {
                let (volume, home, drive) = match slot.occupant() {
                    Some(vol) => (
                        vol.id.as_str(),
                        vol.home.as_str(),
                        vol.drive.as_deref().unwrap_or(""),
                    ),
                    None => ("", "", ""),
                };
                writer
                    .write_record([slot.kind.label(), slot.id.as_str(), volume, home, drive])
                    .map_err(csv_error)?;
            }
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| RustMtxError::system(format!("CSV flush failed: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| RustMtxError::system(format!("CSV output is not UTF-8: {}", e)))
    }
}

fn csv_error(e: csv::Error) -> RustMtxError {
    RustMtxError::system(format!("CSV write failed: {}", e))
}
