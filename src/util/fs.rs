//! Filesystem utilities.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};

/// Read a file to string if it exists.
///
/// A missing file is `Ok(None)`; any other failure is an error.
pub fn read_if_exists(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("failed to read file: {}", path.display())),
    }
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve_relative(base: &Path, path: &Path) -> std::path::PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_read_if_exists() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.rs");

        assert_eq!(read_if_exists(&path).unwrap(), None);

        fs::write(&path, "fn main() {}").unwrap();
        assert_eq!(read_if_exists(&path).unwrap().as_deref(), Some("fn main() {}"));
    }

    #[test]
    fn test_resolve_relative() {
        let base = Path::new("/etc/bindgen");
        assert_eq!(
            resolve_relative(base, Path::new("builder.hh")),
            PathBuf::from("/etc/bindgen/builder.hh")
        );
        assert_eq!(
            resolve_relative(base, Path::new("/tmp/builder.hh")),
            PathBuf::from("/tmp/builder.hh")
        );
    }
}
