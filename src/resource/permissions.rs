//! Read/write permission probes.

use serde::Serialize;
use std::path::Path;

/// Outcome of probing a path for access.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PermissionReport {
    pub read: bool,
    pub write: bool,
}

/// Probe read and write access independently.
///
/// A failed probe, a missing path included, leaves its flag false.
pub fn check_permissions(path: &Path) -> PermissionReport {
    PermissionReport {
        read: can_read(path),
        write: can_write(path),
    }
}

#[cfg(unix)]
pub fn can_read(path: &Path) -> bool {
    use nix::unistd::{access, AccessFlags};
    access(path, AccessFlags::R_OK).is_ok()
}

#[cfg(unix)]
pub fn can_write(path: &Path) -> bool {
    use nix::unistd::{access, AccessFlags};
    access(path, AccessFlags::W_OK).is_ok()
}

#[cfg(not(unix))]
pub fn can_read(path: &Path) -> bool {
    if path.is_dir() {
        std::fs::read_dir(path).is_ok()
    } else {
        std::fs::File::open(path).is_ok()
    }
}

#[cfg(not(unix))]
pub fn can_write(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| !m.permissions().readonly())
        .unwrap_or(false)
}
