//! Shared helper functions for Zeabur operations

use md5::{Digest, Md5};
use std::time::{SystemTime, UNIX_EPOCH};

/// Hex nonce from the clock, the process id and `salt`
pub fn nonce(salt: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();

    let mut hasher = Md5::new();
    hasher.update(nanos.to_le_bytes());
    hasher.update(std::process::id().to_le_bytes());
    hasher.update(salt.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Lowercase name suggestion for new resources, e.g. "kfbdoaje"
pub fn random_name(len: usize) -> String {
    nonce("name")
        .chars()
        .take(len.min(32))
        .map(|c| {
            let v = c.to_digit(16).unwrap_or(0) as u8;
            (b'a' + v) as char
        })
        .collect()
}

/// Whether a build/deploy status means the deployment won't change anymore
pub fn is_terminal_status(status: &str) -> bool {
    matches!(
        status.to_ascii_uppercase().as_str(),
        "RUNNING" | "FAILED" | "CANCELED" | "CANCELLED" | "REMOVED" | "CRASHED" | "SUSPENDED"
    )
}
