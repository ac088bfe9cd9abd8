//! Error conversion helpers that attach the file being worked on

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add the action and path to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// fs.read_to_string(&path)
    ///     .with_path_context("read gradebook", &path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }
}

/// Extension trait for JSON decoding results of the data file.
pub trait JsonResultExt<T> {
    /// Report a decoding failure as `InvalidData` for `path`.
    fn invalid_data_at(self, path: &Path) -> ApplicationResult<T>;
}

impl<T> JsonResultExt<T> for serde_json::Result<T> {
    fn invalid_data_at(self, path: &Path) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::InvalidData {
            path: path.to_path_buf(),
            source,
        })
    }
}
