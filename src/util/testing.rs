//! Test helpers shared by unit and integration tests: logging setup and an
//! in-memory filesystem

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, Once};

use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::infrastructure::traits::FileSystem;

static TEST_SETUP: Once = Once::new();

/// Install a test subscriber once per test binary.
///
/// `RUST_LOG` wins when set; otherwise this crate logs at trace level and
/// everything else at warn.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,gradebook=trace"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_filter(env_filter),
    );

    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else if let Err(e) = subscriber.try_init() {
        eprintln!("Error: Failed to set up logging: {}", e);
    }
}

/// Filesystem kept entirely in memory.
///
/// Parent directories must exist (via `create_dir_all` or `ensure_parent`)
/// before a file can be written below them, as on a real disk.
#[derive(Debug, Default)]
pub struct InMemoryFileSystem {
    state: Mutex<MemState>,
}

#[derive(Debug, Default)]
struct MemState {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
}

impl InMemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories.
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path = path.into();
        {
            let mut state = self.lock();
            if let Some(parent) = path.parent() {
                state.add_dir(parent);
            }
            state.files.insert(path, content.into());
        }
        self
    }

    /// Current content of a file, if it was written.
    pub fn file(&self, path: &Path) -> Option<String> {
        self.lock().files.get(path).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, MemState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl MemState {
    fn add_dir(&mut self, path: &Path) {
        for dir in path.ancestors() {
            if !dir.as_os_str().is_empty() {
                self.dirs.insert(dir.to_path_buf());
            }
        }
    }

    fn has_dir(&self, path: &Path) -> bool {
        path.as_os_str().is_empty() || path.parent().is_none() || self.dirs.contains(path)
    }
}

impl FileSystem for InMemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.lock().files.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{}", path.display()))
        })
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        let mut state = self.lock();
        let parent = path.parent().unwrap_or_else(|| Path::new(""));
        if !state.has_dir(parent) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {}", parent.display()),
            ));
        }
        state.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let state = self.lock();
        state.files.contains_key(path) || state.dirs.contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.lock().add_dir(path);
        Ok(())
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}
