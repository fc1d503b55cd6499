//! Process-wide configuration handle.
//!
//! Lifecycle: uninitialized, then loaded once (on first [`load`] or an
//! explicit [`init_from`]), then immutable for the remainder of the
//! process. An explicit [`reload`] resolves a fresh tree and swaps the
//! handle in a single atomic store, so readers never observe a partially
//! rebuilt configuration; any `Arc` they already hold stays a consistent
//! snapshot of the previous tree.

use super::discovery::LoadOptions;
use super::resolver;
use super::view::Config;
use crate::error::ResolveError;
use arc_swap::ArcSwapOption;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

static CURRENT: ArcSwapOption<Config> = ArcSwapOption::const_empty();

/// Serializes first-load and reload so concurrent callers resolve once.
static LOAD_LOCK: Mutex<()> = Mutex::new(());

/// The current handle, loading with default discovery on first access.
pub fn load() -> Result<Arc<Config>, ResolveError> {
    if let Some(config) = CURRENT.load_full() {
        return Ok(config);
    }
    let _guard = lock();
    if let Some(config) = CURRENT.load_full() {
        return Ok(config);
    }
    install(resolver::load(&LoadOptions::default())?)
}

/// Initialize the handle from an explicit root config file.
///
/// Loads even if a handle is already installed, replacing it atomically;
/// use [`current`] first to avoid that when load-once semantics matter.
pub fn init_from(path: impl AsRef<Path>) -> Result<Arc<Config>, ResolveError> {
    let _guard = lock();
    install(resolver::load_from(path)?)
}

/// The current handle without any load side effect.
pub fn current() -> Option<Arc<Config>> {
    CURRENT.load_full()
}

/// Re-resolve with default discovery and swap the handle atomically.
pub fn reload() -> Result<Arc<Config>, ResolveError> {
    let _guard = lock();
    install(resolver::load(&LoadOptions::default())?)
}

/// Re-resolve from an explicit root file and swap the handle atomically.
pub fn reload_from(path: impl AsRef<Path>) -> Result<Arc<Config>, ResolveError> {
    let _guard = lock();
    install(resolver::load_from(path)?)
}

fn install(config: Config) -> Result<Arc<Config>, ResolveError> {
    let handle = Arc::new(config);
    CURRENT.store(Some(Arc::clone(&handle)));
    info!("global configuration handle installed");
    Ok(handle)
}

fn lock() -> std::sync::MutexGuard<'static, ()> {
    LOAD_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
