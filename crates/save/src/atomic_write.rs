//! Atomic file write using the write-rename pattern.
//!
//! The bytes land in `{path}.tmp` first, are flushed with `sync_all()`,
//! then renamed over the final path, so a crash mid-write can never
//! corrupt an existing template file.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let tmp_path = path.with_extension("tmp");

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("massing_atomic_write_{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_creates_file_and_removes_tmp() {
        let dir = test_dir("creates");
        let path = dir.join("template.mass");

        atomic_write(&path, b"hello template").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"hello template");
        assert!(!path.with_extension("tmp").exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_overwrites_existing() {
        let dir = test_dir("overwrites");
        let path = dir.join("template.mass");

        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_creates_parent_dirs() {
        let dir = test_dir("parents");
        let path = dir.join("nested").join("deep").join("template.mass");

        atomic_write(&path, b"nested").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"nested");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_stale_tmp_does_not_block() {
        let dir = test_dir("stale_tmp");
        let path = dir.join("template.mass");
        fs::write(path.with_extension("tmp"), b"partial garbage").unwrap();

        atomic_write(&path, b"fresh").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"fresh");
        assert!(!path.with_extension("tmp").exists());
        let _ = fs::remove_dir_all(&dir);
    }
}
