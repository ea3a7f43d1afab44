//! Process-wide update-check status flag
//!
//! The background version check lives entirely in host glue; the only thing the
//! rest of the application sees is this flag. It is kept completely outside
//! the core call graph (no retargeting code reads or writes it) and exists so
//! a UI refresh can poll "is an update available" without sharing any rig or
//! mesh state with the checker thread.

use std::sync::{Mutex, OnceLock};

/// Snapshot of the last known update-check state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateStatus {
    /// A check is currently in flight
    pub checking: bool,
    /// A newer version was reported
    pub update_available: bool,
    /// Version string of the newest release, when available
    pub latest_version: String,
    /// Download link for the newest release, when available
    pub download_link: String,
}

fn state() -> &'static Mutex<UpdateStatus> {
    static STATE: OnceLock<Mutex<UpdateStatus>> = OnceLock::new();
    STATE.get_or_init(|| Mutex::new(UpdateStatus::default()))
}

fn with_state<R>(f: impl FnOnce(&mut UpdateStatus) -> R) -> R {
    let mut guard = match state().lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    f(&mut guard)
}

/// Mark a check as started.
pub fn begin_check() {
    with_state(|s| s.checking = true);
}

/// Record the outcome of a finished check.
pub fn record_result(update_available: bool, latest_version: &str, download_link: &str) {
    with_state(|s| {
        s.checking = false;
        s.update_available = update_available;
        s.latest_version = latest_version.to_string();
        s.download_link = download_link.to_string();
    });
}

/// Current state, copied out.
pub fn snapshot() -> UpdateStatus {
    with_state(|s| s.clone())
}

/// Reset to the initial state.
pub fn clear() {
    with_state(|s| *s = UpdateStatus::default());
}
