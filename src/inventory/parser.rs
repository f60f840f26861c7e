//! Status Report Parser
//!
//! Turns the text printed by `mtx status` into an [`Inventory`].

use crate::error::{Result, RustMtxError};
use super::types::*;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::debug;

const SUMMARY_PATTERN: &str =
    r"^\s*Storage Changer .*:(\d+) Drives, (\d+) Slots \( (\d+) Import/Export \)";

/// Element line grammars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementLine {
    StorageFull,
    StorageEmpty,
    DriveFull,
    DriveEmpty,
    MailboxEmpty,
    MailboxFull,
}

// Tried top to bottom; the most frequent lines of a large library come first.
const ELEMENT_GRAMMARS: [(ElementLine, &str); 6] = [
    (
        ElementLine::StorageFull,
        r"^\s*Storage Element (\d+):Full(?: :VolumeTag=(.*))?",
    ),
    (ElementLine::StorageEmpty, r"^\s*Storage Element (\d+):Empty"),
    (
        ElementLine::DriveFull,
        r"^\s*Data Transfer Element (\d+):Full \(Storage Element (\d+) Loaded\)(?::VolumeTag = (.*))?",
    ),
    (ElementLine::DriveEmpty, r"^\s*Data Transfer Element (\d+):Empty"),
    (
        ElementLine::MailboxEmpty,
        r"^\s*Storage Element (\d+) IMPORT/EXPORT:Empty",
    ),
    (
        ElementLine::MailboxFull,
        r"^\s*Storage Element (\d+) IMPORT/EXPORT:Full(?: :VolumeTag=(.*))?",
    ),
];

fn summary_regex() -> &'static Regex {
    static SUMMARY: OnceLock<Regex> = OnceLock::new();
    SUMMARY.get_or_init(|| Regex::new(SUMMARY_PATTERN).expect("summary pattern is valid"))
}

fn element_grammars() -> &'static [(ElementLine, Regex)] {
    static GRAMMARS: OnceLock<Vec<(ElementLine, Regex)>> = OnceLock::new();
    GRAMMARS.get_or_init(|| {
        ELEMENT_GRAMMARS
            .iter()
            .map(|(kind, pattern)| {
                (*kind, Regex::new(pattern).expect("element pattern is valid"))
            })
            .collect()
    })
}

/// Counts taken from the first report line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Summary {
    drives: usize,
    storage_slots: usize,
    mailbox_slots: usize,
}

impl Inventory {
    /// Parse a complete `status` report.
    ///
    /// The first line must be the changer summary; a missing or malformed
    /// summary fails the whole parse. Element lines that match none of the
    /// known grammars are skipped.
    pub fn from_status_report(report: &str) -> Result<Self> {
        debug!("Parsing status report, length: {}", report.len());

        let mut lines = report.lines();
        let first = lines
            .next()
            .ok_or_else(|| RustMtxError::malformed_report("no summary output found"))?;
        let summary = parse_summary(first)?;

        let mut drives = HashMap::new();
        let mut storage_slots = HashMap::new();
        let mut mailbox_slots = HashMap::new();
        let mut skipped = 0usize;

        for line in lines {
            let Some((kind, caps)) = match_element(line) else {
                if !line.trim().is_empty() {
                    skipped += 1;
                }
                continue;
            };

            let id = caps[1].to_string();
            match kind {
                ElementLine::StorageFull => {
                    let vol = Volume::new(volume_tag(caps.get(2)), id.as_str());
                    storage_slots.insert(id.clone(), Slot::occupied(SlotKind::StorageSlot, id, vol));
                }
                ElementLine::StorageEmpty => {
                    storage_slots.insert(id.clone(), Slot::empty(SlotKind::StorageSlot, id));
                }
                ElementLine::DriveFull => {
                    let vol = Volume::new(volume_tag(caps.get(3)), &caps[2]);
                    drives.insert(id.clone(), Slot::occupied(SlotKind::Drive, id, vol));
                }
                ElementLine::DriveEmpty => {
                    drives.insert(id.clone(), Slot::empty(SlotKind::Drive, id));
                }
                ElementLine::MailboxEmpty => {
                    mailbox_slots.insert(id.clone(), Slot::empty(SlotKind::MailboxSlot, id));
                }
                ElementLine::MailboxFull => {
                    let vol = Volume::new(volume_tag(caps.get(2)), id.as_str());
                    mailbox_slots.insert(id.clone(), Slot::occupied(SlotKind::MailboxSlot, id, vol));
                }
            }
        }

        debug!(
            "Parsed {} drives, {} storage slots, {} mailbox slots ({} unrecognized lines)",
            drives.len(),
            storage_slots.len(),
            mailbox_slots.len(),
            skipped
        );

        Ok(Inventory {
            num_drives: summary.drives,
            num_storage_slots: summary.storage_slots,
            num_mailbox_slots: summary.mailbox_slots,
            drives,
            storage_slots,
            mailbox_slots,
        })
    }
}

impl FromStr for Inventory {
    type Err = RustMtxError;

    fn from_str(s: &str) -> Result<Self> {
        Inventory::from_status_report(s)
    }
}

fn parse_summary(line: &str) -> Result<Summary> {
    let caps = summary_regex()
        .captures(line)
        .ok_or_else(|| RustMtxError::malformed_report(format!("no summary output found in {:?}", line)))?;

    let drives = parse_count(&caps[1], "drive")?;
    let total = parse_count(&caps[2], "slot")?;
    let mailbox_slots = parse_count(&caps[3], "import/export")?;
    let storage_slots = total.checked_sub(mailbox_slots).ok_or_else(|| {
        RustMtxError::malformed_report(format!(
            "{} import/export slots exceed {} total slots",
            mailbox_slots, total
        ))
    })?;

    Ok(Summary {
        drives,
        storage_slots,
        mailbox_slots,
    })
}

fn parse_count(field: &str, what: &str) -> Result<usize> {
    field.parse::<usize>().map_err(|e| {
        RustMtxError::malformed_report(format!("invalid {} count {:?}: {}", what, field, e))
    })
}

fn match_element(line: &str) -> Option<(ElementLine, Captures<'_>)> {
    element_grammars()
        .iter()
        .find_map(|(kind, rx)| rx.captures(line).map(|caps| (*kind, caps)))
}

// mtx pads tags to a fixed width; only the padding is dropped.
fn volume_tag(capture: Option<regex::Match<'_>>) -> String {
    capture
        .map(|m| m.as_str().trim_end().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
pub(crate) const SAMPLE_REPORT: &str = "  Storage Changer X:2 Drives, 6 Slots ( 2 Import/Export )
Data Transfer Element 0:Full (Storage Element 1 Loaded):VolumeTag = M00001L6
Data Transfer Element 1:Empty
      Storage Element 1:Empty
      Storage Element 2:Empty
      Storage Element 3:Full :VolumeTag=M00003L6
      Storage Element 4:Full :VolumeTag=CLN004L6
      Storage Element 5 IMPORT/EXPORT:Full :VolumeTag=M00002L6
      Storage Element 6 IMPORT/EXPORT:Empty
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_report_counts() {
        let inv = Inventory::from_status_report(SAMPLE_REPORT).unwrap();
        assert_eq!(inv.num_drives, 2);
        assert_eq!(inv.num_storage_slots, 4);
        assert_eq!(inv.num_mailbox_slots, 2);
        assert_eq!(inv.drives().len(), 2);
        assert_eq!(inv.storage_slots().len(), 4);
        assert_eq!(inv.mailbox_slots().len(), 2);
    }

    #[test]
    fn test_sample_report_placements() {
        let inv: Inventory = SAMPLE_REPORT.parse().unwrap();

        let d0 = &inv.drives()["0"];
        assert_eq!(d0.kind, SlotKind::Drive);
        let vol = d0.occupant().unwrap();
        assert_eq!(vol.id, "M00001L6");
        assert_eq!(vol.home, "1");
        assert_eq!(vol.drive.as_deref(), Some("0"));

        assert!(inv.drives()["1"].is_empty());
        assert!(inv.storage_slots()["1"].is_empty());
        assert!(inv.storage_slots()["2"].is_empty());

        let s3 = inv.storage_slots()["3"].occupant().unwrap();
        assert_eq!(s3.id, "M00003L6");
        assert_eq!(s3.home, "3");
        assert_eq!(s3.drive, None);

        let s4 = inv.storage_slots()["4"].occupant().unwrap();
        assert_eq!(s4.id, "CLN004L6");

        let m5 = &inv.mailbox_slots()["5"];
        assert_eq!(m5.kind, SlotKind::MailboxSlot);
        assert_eq!(m5.occupant().unwrap().id, "M00002L6");
        assert_eq!(m5.occupant().unwrap().home, "5");
        assert!(inv.mailbox_slots()["6"].is_empty());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let a = Inventory::from_status_report(SAMPLE_REPORT).unwrap();
        let b = Inventory::from_status_report(SAMPLE_REPORT).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_summary_is_malformed() {
        let err = Inventory::from_status_report("").unwrap_err();
        assert!(matches!(err, RustMtxError::MalformedReport(_)));

        let report = "Data Transfer Element 0:Empty\n";
        let err = Inventory::from_status_report(report).unwrap_err();
        assert!(matches!(err, RustMtxError::MalformedReport(_)));
    }

    #[test]
    fn test_non_numeric_and_overflowing_counts() {
        let report = "Storage Changer X:two Drives, 6 Slots ( 2 Import/Export )\n";
        assert!(matches!(
            Inventory::from_status_report(report),
            Err(RustMtxError::MalformedReport(_))
        ));

        let report = "Storage Changer X:99999999999999999999999 Drives, 6 Slots ( 2 Import/Export )\n";
        assert!(matches!(
            Inventory::from_status_report(report),
            Err(RustMtxError::MalformedReport(_))
        ));
    }

    #[test]
    fn test_mailbox_count_exceeding_total_is_malformed() {
        let report = "Storage Changer X:1 Drives, 2 Slots ( 3 Import/Export )\n";
        assert!(matches!(
            Inventory::from_status_report(report),
            Err(RustMtxError::MalformedReport(_))
        ));
    }

    #[test]
    fn test_unrecognized_lines_are_ignored() {
        let report = "Storage Changer /dev/sg3:1 Drives, 1 Slots ( 0 Import/Export )
Data Transfer Element 0:Empty
Some vendor banner line
      Storage Element 1:Empty
";
        let inv = Inventory::from_status_report(report).unwrap();
        assert_eq!(inv.drives().len(), 1);
        assert_eq!(inv.storage_slots().len(), 1);
        assert!(inv.mailbox_slots().is_empty());
    }

    #[test]
    fn test_mailbox_lines_not_taken_as_storage() {
        let report = "Storage Changer X:0 Drives, 2 Slots ( 2 Import/Export )
      Storage Element 7 IMPORT/EXPORT:Full :VolumeTag=A00007L6
      Storage Element 8 IMPORT/EXPORT:Empty
";
        let inv = Inventory::from_status_report(report).unwrap();
        assert!(inv.storage_slots().is_empty());
        assert_eq!(inv.mailbox_slots().len(), 2);
        assert_eq!(inv.mailbox_slots()["7"].occupant().unwrap().id, "A00007L6");
    }

    #[test]
    fn test_volume_tag_trimming_policy() {
        let report = "Storage Changer X:1 Drives, 2 Slots ( 0 Import/Export )\r
Data Transfer Element 0:Full (Storage Element 2 Loaded):VolumeTag = TAG 0001   \r
      Storage Element 1:Full :VolumeTag=AB CD01L6                        \r
";
        let inv = Inventory::from_status_report(report).unwrap();
        assert_eq!(inv.drives()["0"].occupant().unwrap().id, "TAG 0001");
        assert_eq!(inv.storage_slots()["1"].occupant().unwrap().id, "AB CD01L6");
    }

    #[test]
    fn test_full_element_without_barcode() {
        let report = "Storage Changer X:1 Drives, 1 Slots ( 0 Import/Export )
Data Transfer Element 0:Full (Storage Element 1 Loaded)
";
        let inv = Inventory::from_status_report(report).unwrap();
        let vol = inv.drives()["0"].occupant().unwrap();
        assert_eq!(vol.id, "");
        assert_eq!(vol.home, "1");
        assert_eq!(vol.drive.as_deref(), Some("0"));
    }
}
