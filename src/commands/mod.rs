//! Command Handlers Module
//!
//! This module contains handlers for all CLI subcommands.

pub mod moves;
pub mod status;

use indicatif::{ProgressBar, ProgressStyle};
use rust_mtx::error::{Result, RustMtxError};
use rust_mtx::{ChangerConfig, Library};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Resolved configuration plus the library handle built from it
pub struct Context {
    pub library: Arc<Library>,
    pub config: ChangerConfig,
}

impl Context {
    pub fn open(
        config_path: Option<&Path>,
        device: Option<String>,
        command: Option<String>,
    ) -> Result<Self> {
        let config = ChangerConfig::resolve(config_path)?.with_overrides(device, command);
        let library = Library::from_config(&config)?;
        debug!(
            "Using changer {} via {} (refresh before move: {})",
            library,
            library.command(),
            config.refresh_before_move
        );
        Ok(Self {
            library: Arc::new(library),
            config,
        })
    }
}

/// Run a library call on the blocking pool; robot moves take seconds.
pub async fn blocking<T, F>(library: &Arc<Library>, f: F) -> Result<T>
where
    F: FnOnce(&Library) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let lib = Arc::clone(library);
    tokio::task::spawn_blocking(move || f(&lib))
        .await
        .map_err(|e| RustMtxError::system(format!("changer task failed: {}", e)))?
}

pub fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} [{elapsed}]") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
