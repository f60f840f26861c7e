use crate::inventory::{sorted_slots, Inventory, Slot, Volume};
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Render the inventory as a fixed-width table, one element per line
pub fn render_inventory_table(inventory: &Inventory) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} drives, {} storage slots, {} import/export slots",
        inventory.num_drives, inventory.num_storage_slots, inventory.num_mailbox_slots
    );
    let _ = writeln!(out, "{:<14} {:>6}  {:<20} {:>6}", "Element", "Id", "Volume", "Home");
    let _ = writeln!(out, "{:-<50}", "");

    for map in [
        inventory.drives(),
        inventory.storage_slots(),
        inventory.mailbox_slots(),
    ] {
        for slot in sorted_slots(map) {
            let _ = writeln!(out, "{}", format_slot_row(slot));
        }
    }
    out
}

fn format_slot_row(slot: &Slot) -> String {
    match slot.occupant() {
        Some(vol) => format!(
            "{:<14} {:>6}  {:<20} {:>6}",
            slot.kind.label(),
            slot.id,
            volume_label(vol),
            vol.home
        ),
        None => format!("{:<14} {:>6}  {:<20} {:>6}", slot.kind.label(), slot.id, "(empty)", "-"),
    }
}

fn volume_label(vol: &Volume) -> String {
    if vol.id.is_empty() {
        "(no barcode)".to_string()
    } else {
        vol.id.clone()
    }
}

/// Display the inventory to stdout
pub fn display_inventory(inventory: &Inventory, refreshed_at: Option<DateTime<Utc>>) {
    print!("{}", render_inventory_table(inventory));
    if let Some(ts) = refreshed_at {
        println!("Refreshed: {}", format_time(&ts));
    }
}

/// Display a one-line summary of a completed move
pub fn display_move(action: &str, vol: &Volume) {
    match &vol.drive {
        Some(drive) => println!("{} {} -> drive {}", action, volume_label(vol), drive),
        None => println!("{} {} -> slot {}", action, volume_label(vol), vol.home),
    }
}

/// Format timestamp in readable format
pub fn format_time(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Display warning message in consistent format
pub fn display_warning(warning: &str) {
    eprintln!("Warning: {}", warning);
}
