use std::fs;
use std::path::{Path, PathBuf};

/// Resolve where an export lands: a directory gets `default_file_name` appended
pub fn resolve_export_path(target: &Path, default_file_name: &str) -> PathBuf {
    if target.is_dir() {
        target.join(default_file_name)
    } else {
        target.to_path_buf()
    }
}

/// Write `contents` to `path`, creating missing parent directories
pub fn write_document(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents)
}

fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_export_path_for_directory() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve_export_path(dir.path(), "out.json");
        assert_eq!(resolved, dir.path().join("out.json"));
    }

    #[test]
    fn test_write_document_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("out.json");

        write_document(&path, "[]").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }
}
