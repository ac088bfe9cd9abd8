//! Gradebook persistence service
//!
//! Loads the gradebook from its JSON data file, applies mutations and writes
//! it back.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt, JsonResultExt};
use crate::domain::{DomainResult, Gradebook, GradebookDocument};
use crate::infrastructure::traits::FileSystem;

/// Indentation of the data file written by `save`.
const DATA_FILE_INDENT: usize = 2;

/// Service owning the location of the gradebook data file.
pub struct GradebookService {
    fs: Arc<dyn FileSystem>,
    data_file: PathBuf,
}

impl GradebookService {
    /// Create a new gradebook service.
    pub fn new(fs: Arc<dyn FileSystem>, data_file: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            data_file: data_file.into(),
        }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Load the configured data file.
    ///
    /// A data file that does not exist yet is an empty gradebook.
    pub fn load(&self) -> ApplicationResult<Gradebook> {
        if !self.fs.exists(&self.data_file) {
            debug!(
                "load: {} does not exist, starting empty",
                self.data_file.display()
            );
            return Ok(Gradebook::new());
        }
        self.load_from(&self.data_file)
    }

    /// Load a gradebook from an explicit path; the file must exist.
    pub fn load_from(&self, path: &Path) -> ApplicationResult<Gradebook> {
        debug!("load_from: {}", path.display());
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read gradebook", path)?;
        let document: GradebookDocument = serde_json::from_str(&content).invalid_data_at(path)?;
        Ok(Gradebook::from_document(document))
    }

    /// Write the gradebook to the configured data file.
    pub fn save(&self, gradebook: &Gradebook) -> ApplicationResult<()> {
        self.save_to(&self.data_file, gradebook)
    }

    /// Write the gradebook to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path, gradebook: &Gradebook) -> ApplicationResult<()> {
        debug!("save_to: {}", path.display());
        let mut content = Self::export(gradebook, DATA_FILE_INDENT)?;
        content.push('\n');
        self.fs
            .ensure_parent(path)
            .with_path_context("create parent directory", path)?;
        self.fs
            .write(path, &content)
            .with_path_context("write gradebook", path)
    }

    /// Load, apply `f`, and save.
    ///
    /// The data file is only rewritten when `f` succeeds, so a rejected
    /// operation leaves it untouched.
    pub fn update<T, F>(&self, f: F) -> ApplicationResult<T>
    where
        F: FnOnce(&mut Gradebook) -> DomainResult<T>,
    {
        let mut gradebook = self.load()?;
        let output = f(&mut gradebook)?;
        self.save(&gradebook)?;
        Ok(output)
    }

    /// Render the gradebook as JSON indented by `indent` spaces.
    ///
    /// With `indent == 0` entries still go on separate lines, just without
    /// leading whitespace.
    pub fn export(gradebook: &Gradebook, indent: usize) -> ApplicationResult<String> {
        let indent = " ".repeat(indent);
        let mut buf = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(
            &mut buf,
            PrettyFormatter::with_indent(indent.as_bytes()),
        );
        gradebook
            .to_document()
            .serialize(&mut serializer)
            .map_err(|e| ApplicationError::OperationFailed {
                context: "serialize gradebook".to_string(),
                source: Box::new(e),
            })?;
        String::from_utf8(buf).map_err(|e| ApplicationError::OperationFailed {
            context: "encode gradebook as UTF-8".to_string(),
            source: Box::new(e),
        })
    }
}
