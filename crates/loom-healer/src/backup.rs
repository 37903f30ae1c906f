//! ---
//! loom_section: "06-healer"
//! loom_subsection: "backup"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Write-a-backup-once-then-overwrite discipline for healed component files."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use std::path::Path;

use crate::errors::HealError;

/// Write `healed` to `path`, first snapshotting the current on-disk bytes to
/// a `.backup` sibling — but only the first time a component is healed, so
/// the backup always holds the pre-healing original rather than an
/// intermediate healing attempt.
pub fn write_healed(path: &Path, original: &str, healed: &str) -> Result<(), HealError> {
    let backup_path = backup_path_for(path);
    if !backup_path.exists() {
        std::fs::write(&backup_path, original).map_err(|err| HealError::Io {
            path: backup_path.display().to_string(),
            detail: err.to_string(),
        })?;
    }
    std::fs::write(path, healed).map_err(|err| HealError::Io {
        path: path.display().to_string(),
        detail: err.to_string(),
    })
}

fn backup_path_for(path: &Path) -> std::path::PathBuf {
    let mut backup = path.as_os_str().to_owned();
    backup.push(".backup");
    std::path::PathBuf::from(backup)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backup_written_once_then_preserved() {
        let dir = std::env::temp_dir().join(format!("loom-healer-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("component.py");
        std::fs::write(&path, "original").unwrap();

        write_healed(&path, "original", "healed once").unwrap();
        assert_eq!(std::fs::read_to_string(backup_path_for(&path)).unwrap(), "original");

        write_healed(&path, "healed once", "healed twice").unwrap();
        assert_eq!(std::fs::read_to_string(backup_path_for(&path)).unwrap(), "original");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "healed twice");

        std::fs::remove_dir_all(&dir).ok();
    }
}
