use crate::error::{NetplayError, Result};
use std::path::Path;

fn map_io_error(path: &Path, e: std::io::Error) -> NetplayError {
    match e.kind() {
        std::io::ErrorKind::PermissionDenied => NetplayError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => NetplayError::from(e),
    }
}

pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e))?;
    }
    Ok(())
}

pub fn remove_dir_recursive(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e))?;
    }
    Ok(())
}

/// Moves `source` to `target`, replacing whatever directory is at `target`.
///
/// The old `target` is first moved aside to `backup` and only deleted once
/// `source` is in place; if the final rename fails the old directory is
/// restored, so `target` is never left missing. Failing to delete the backup
/// afterwards is only logged.
pub fn replace_dir(source: &Path, target: &Path, backup: &Path) -> Result<()> {
    remove_dir_recursive(backup)?;

    let had_previous = target.exists();
    if had_previous {
        std::fs::rename(target, backup).map_err(|e| map_io_error(target, e))?;
    }

    if let Err(e) = std::fs::rename(source, target) {
        if had_previous {
            if let Err(restore_err) = std::fs::rename(backup, target) {
                log::error!(
                    "Failed to restore previous installation from {}: {restore_err}",
                    backup.display()
                );
            }
        }
        return Err(NetplayError::install_error(format!(
            "could not move {} to {}: {e}",
            source.display(),
            target.display()
        )));
    }

    // The new install is already in place; a stuck backup is cleared on the next run.
    if had_previous {
        if let Err(e) = remove_dir_recursive(backup) {
            log::warn!(
                "Could not remove previous installation at {}: {e}",
                backup.display()
            );
        }
    }

    Ok(())
}

pub fn make_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path)?.permissions();
        perms.set_mode(perms.mode() | 0o755);
        std::fs::set_permissions(path, perms)?;
    }

    // On Windows, executable permission is determined by file extension
    #[cfg(windows)]
    {
        let _ = path;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_replace_dir_without_previous() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("staged");
        let target = dir.path().join("netplay");
        let backup = dir.path().join(".netplay-previous");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::write(source.join("Dolphin.exe"), b"new").unwrap();

        replace_dir(&source, &target, &backup).unwrap();

        assert!(!source.exists());
        assert!(!backup.exists());
        assert_eq!(std::fs::read(target.join("Dolphin.exe")).unwrap(), b"new");
    }

    #[test]
    fn test_replace_dir_discards_previous_content() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("staged");
        let target = dir.path().join("netplay");
        let backup = dir.path().join(".netplay-previous");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::create_dir_all(&target).unwrap();
        std::fs::write(source.join("Dolphin.exe"), b"new").unwrap();
        std::fs::write(target.join("Dolphin.exe"), b"old").unwrap();
        std::fs::write(target.join("stale.ini"), b"old").unwrap();

        replace_dir(&source, &target, &backup).unwrap();

        assert_eq!(std::fs::read(target.join("Dolphin.exe")).unwrap(), b"new");
        assert!(!target.join("stale.ini").exists());
        assert!(!backup.exists());
    }

    #[test]
    fn test_replace_dir_restores_previous_on_failure() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("missing");
        let target = dir.path().join("netplay");
        let backup = dir.path().join(".netplay-previous");
        std::fs::create_dir_all(&target).unwrap();
        std::fs::write(target.join("Dolphin.exe"), b"old").unwrap();

        let err = replace_dir(&source, &target, &backup).unwrap_err();

        assert!(matches!(err, NetplayError::InstallError { .. }));
        assert_eq!(std::fs::read(target.join("Dolphin.exe")).unwrap(), b"old");
        assert!(!backup.exists());
    }

    #[test]
    fn test_replace_dir_succeeds_when_backup_cannot_be_removed() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("staged");
        let target = dir.path().join("netplay");
        let backup = dir.path().join(".netplay-previous");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::write(source.join("Dolphin.exe"), b"new").unwrap();
        // A plain file moved aside cannot be removed as a directory.
        std::fs::write(&target, b"not a directory").unwrap();

        replace_dir(&source, &target, &backup).unwrap();

        assert!(!source.exists());
        assert_eq!(std::fs::read(target.join("Dolphin.exe")).unwrap(), b"new");
        assert!(backup.is_file());
    }

    #[test]
    fn test_remove_dir_recursive_missing_is_ok() {
        let dir = TempDir::new().unwrap();
        assert!(remove_dir_recursive(&dir.path().join("nope")).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_make_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let file = dir.path().join("Slippi.AppImage");
        std::fs::write(&file, b"elf").unwrap();

        make_executable(&file).unwrap();

        let mode = std::fs::metadata(&file).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}
