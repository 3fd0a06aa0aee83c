//! IO utilities.

use std::path::Path;

use tempdir::TempDir;

use crate::error::{with_err_context, ErrorContext, ErrorSource, Result};

pub fn create_dir_all(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    with_err_context(std::fs::create_dir_all(path), || {
        ErrorContext::CreateDir(path.to_path_buf())
    })?;
    Ok(())
}

pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let data = with_err_context(std::fs::read_to_string(path), || {
        ErrorContext::ReadFile(path.to_path_buf())
    })?;
    Ok(data)
}

/// Writes a file by calling `write` on a scratch path, then moving the result to `path`.
///
/// The scratch file lives in a temporary directory next to `path`,
/// which is removed on every exit path. `path` is only touched if `write` succeeds.
pub fn write_atomic<F>(path: impl AsRef<Path>, write: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => std::env::current_dir()?,
    };
    create_dir_all(&parent)?;
    let file_name = path.file_name().ok_or_else(|| {
        ErrorSource::InvalidOption(format!("not a file path: {}", path.display()))
    })?;

    let scratch = with_err_context(TempDir::new_in(&parent, "qlayout"), || {
        ErrorContext::CreateDir(parent.clone())
    })?;
    let staged = scratch.path().join(file_name);
    with_err_context(write(&staged), || {
        ErrorContext::CreateFile(path.to_path_buf())
    })?;
    with_err_context(std::fs::rename(&staged, path), || {
        ErrorContext::CreateFile(path.to_path_buf())
    })?;
    Ok(())
}

/// Atomically writes `contents` to `path`.
pub fn write_string(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    write_atomic(path, |staged| {
        std::fs::write(staged, contents)?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_write_leaves_nothing() {
        let dir = TempDir::new("qlayout_io").unwrap();
        let target = dir.path().join("out.txt");
        let res = write_atomic(&target, |_| Err(ErrorSource::InvalidOption("fail".into()).into()));
        assert!(res.is_err());
        assert!(!target.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_write_string() {
        let dir = TempDir::new("qlayout_io").unwrap();
        let target = dir.path().join("nested/out.txt");
        write_string(&target, "hello").unwrap();
        assert_eq!(read_to_string(&target).unwrap(), "hello");
    }
}
