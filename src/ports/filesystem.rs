//! Filesystem port for the files the crate writes.

use std::path::Path;

/// Provides filesystem access for archives and extracted scripts.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Writes the given contents to a file, creating or overwriting it.
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()>;

    /// Creates a directory and all of its missing parents.
    ///
    /// # Errors
    ///
    /// Returns an error if any component cannot be created.
    fn create_dir_all(&self, path: &Path) -> std::io::Result<()>;

    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;
}
