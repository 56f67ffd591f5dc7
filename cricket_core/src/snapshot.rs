//! Raw-payload snapshot hook.
//!
//! The fetch to transform hand-off is in-memory; when a snapshot path is
//! configured the raw body is additionally written here for external
//! inspection, overwritten each tick. Failures are the caller's to log:
//! the snapshot is never part of the data path.

use std::fs;
use std::io;
use std::path::Path;

pub fn write_snapshot(path: &Path, body: &str) -> io::Result<()> {
    fs::write(path, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_overwrites_previous_tick() {
        let path = std::env::temp_dir().join("cricket_snapshot_test.json");
        write_snapshot(&path, r#"{"data": []}"#).unwrap();
        write_snapshot(&path, r#"{"data": [1]}"#).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"data": [1]}"#);
        let _ = fs::remove_file(&path);
    }
}
