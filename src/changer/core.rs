use crate::config::ChangerConfig;
use crate::error::{Result, RustMtxError};
use crate::inventory::Inventory;
use super::executor::{CommandExecutor, ProcessExecutor};
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, MutexGuard};
use std::fmt;
use tracing::{debug, info, warn};

/// Default changer-control program
pub const DEFAULT_COMMAND: &str = "mtx";

/// Guarded state of a library handle
#[derive(Debug, Default)]
pub(crate) struct LibraryState {
    /// `None` until the first successful refresh
    pub(crate) inventory: Option<Inventory>,
    pub(crate) refreshed_at: Option<DateTime<Utc>>,
}

/// A single SCSI media changer.
///
/// One lock covers the inventory and every command sent to the device, so
/// robot moves issued through the same handle never overlap.
pub struct Library {
    device: String,
    command: String,
    executor: Box<dyn CommandExecutor>,
    state: Mutex<LibraryState>,
}

impl Library {
    /// Library driven by `mtx` on the given device
    pub fn new(device: &str) -> Self {
        Self::with_command(device, DEFAULT_COMMAND)
    }

    /// Library driven by a custom changer-control program
    pub fn with_command(device: &str, command: &str) -> Self {
        Self::with_executor(device, command, ProcessExecutor)
    }

    pub fn with_executor<E>(device: &str, command: &str, executor: E) -> Self
    where
        E: CommandExecutor + 'static,
    {
        Self {
            device: device.to_string(),
            command: command.to_string(),
            executor: Box::new(executor),
            state: Mutex::new(LibraryState::default()),
        }
    }

    pub fn from_config(config: &ChangerConfig) -> Result<Self> {
        let device = config.device.as_deref().ok_or_else(|| {
            RustMtxError::parameter_validation("no changer device configured")
        })?;
        Ok(Self::with_command(device, &config.command))
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Query the changer and replace the stored inventory.
    ///
    /// On any failure the previous inventory is kept.
    pub fn status(&self) -> Result<()> {
        let mut state = self.state.lock();
        let report = self.run(&["status"]).map_err(|e| e.in_operation("status"))?;
        let inventory =
            Inventory::from_status_report(&report).map_err(|e| e.in_operation("status"))?;

        for issue in inventory.count_discrepancies() {
            warn!("{}: {}", self.device, issue);
        }

        info!(
            "{}: inventory refreshed ({} drives, {} storage slots, {} mailbox slots)",
            self.device,
            inventory.num_drives,
            inventory.num_storage_slots,
            inventory.num_mailbox_slots
        );
        state.inventory = Some(inventory);
        state.refreshed_at = Some(Utc::now());
        Ok(())
    }

    /// Ask the changer to rescan all elements. The stored inventory is not
    /// touched; call [`Library::status`] afterwards to pick up changes.
    pub fn inventory(&self) -> Result<()> {
        let _state = self.state.lock();
        self.run(&["inventory"])
            .map_err(|e| e.in_operation("inventory"))?;
        info!("{}: physical inventory completed", self.device);
        Ok(())
    }

    /// Copy of the current inventory; empty before the first refresh.
    pub fn info(&self) -> Inventory {
        self.state.lock().inventory.clone().unwrap_or_default()
    }

    pub fn is_populated(&self) -> bool {
        self.state.lock().inventory.is_some()
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.state.lock().refreshed_at
    }

    pub(crate) fn lock_state(&self) -> MutexGuard<'_, LibraryState> {
        self.state.lock()
    }

    /// Send one command to the device. Callers hold the state lock.
    pub(crate) fn run(&self, args: &[&str]) -> Result<String> {
        debug!("{}: {} {}", self.device, self.command, args.join(" "));
        self.executor.execute(&self.command, &self.device, args)
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.device)
    }
}

impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("device", &self.device)
            .field("command", &self.command)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changer::testing::ScriptedExecutor;
    use crate::inventory::parser::SAMPLE_REPORT;

    #[test]
    fn test_new_library_defaults() {
        let lib = Library::new("/dev/sg3");
        assert_eq!(lib.device(), "/dev/sg3");
        assert_eq!(lib.command(), "mtx");
        assert_eq!(lib.to_string(), "/dev/sg3");
        assert!(!lib.is_populated());
        assert_eq!(lib.info(), Inventory::default());
    }

    #[test]
    fn test_status_populates_inventory() {
        let exec = ScriptedExecutor::with_report(SAMPLE_REPORT);
        let lib = Library::with_executor("/dev/sg3", "mtx", exec.clone());

        lib.status().unwrap();
        assert!(lib.is_populated());
        assert!(lib.last_refresh().is_some());
        assert_eq!(lib.info().num_drives, 2);
        assert_eq!(exec.calls(), vec!["status".to_string()]);
    }

    #[test]
    fn test_failed_refresh_keeps_previous_inventory() {
        let exec = ScriptedExecutor::with_report(SAMPLE_REPORT);
        let lib = Library::with_executor("/dev/sg3", "mtx", exec.clone());
        lib.status().unwrap();
        let before = lib.info();
        let refreshed = lib.last_refresh();

        exec.set_report("garbage\n");
        let err = lib.status().unwrap_err();
        assert!(err.to_string().starts_with("status: "));
        assert!(matches!(err.root_cause(), RustMtxError::MalformedReport(_)));
        assert_eq!(lib.info(), before);
        assert_eq!(lib.last_refresh(), refreshed);

        exec.fail_next("mtx: cannot open /dev/sg3");
        let err = lib.status().unwrap_err();
        assert!(matches!(
            err.root_cause(),
            RustMtxError::ExternalCommandFailed { diagnostic, .. } if diagnostic == "mtx: cannot open /dev/sg3"
        ));
        assert_eq!(lib.info(), before);
    }

    #[test]
    fn test_inventory_does_not_parse() {
        let exec = ScriptedExecutor::with_report(SAMPLE_REPORT);
        let lib = Library::with_executor("/dev/sg3", "mtx", exec.clone());
        lib.inventory().unwrap();
        assert!(!lib.is_populated());
        assert_eq!(exec.calls(), vec!["inventory".to_string()]);
    }

    #[test]
    fn test_from_config_requires_device() {
        let config = ChangerConfig::default();
        assert!(matches!(
            Library::from_config(&config),
            Err(RustMtxError::ParameterValidation(_))
        ));

        let config = ChangerConfig {
            device: Some("/dev/sg5".to_string()),
            command: "/usr/local/bin/mtx".to_string(),
            ..ChangerConfig::default()
        };
        let lib = Library::from_config(&config).unwrap();
        assert_eq!(lib.device(), "/dev/sg5");
        assert_eq!(lib.command(), "/usr/local/bin/mtx");
    }
}
