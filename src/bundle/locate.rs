#![forbid(unsafe_code)]

use std::path::PathBuf;

use crate::bundle::error::{BundleError, BundleResult};

/// Canonical path of the currently executing image. Platform variance
/// (procfs vs. OS query) lives inside `current_exe`; callers never branch.
pub fn self_exe() -> BundleResult<PathBuf> {
    let exe = std::env::current_exe().map_err(|_| BundleError::SelfPath)?;
    exe.canonicalize().map_err(|_| BundleError::SelfPath)
}

/// Where scratch files go. Honours the platform temp override variable
/// (`TMPDIR` on Unix) via the standard resolution.
pub fn scratch_dir() -> PathBuf {
    std::env::temp_dir()
}

/// Per-process filename token, so concurrent bundles on one host never
/// collide on scratch names.
pub fn scratch_prefix() -> String {
    format!("pybundle-{}-", std::process::id())
}
