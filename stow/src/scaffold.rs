//! Boilerplate file scaffolding.
//!
//! Writes the same file into each of a list of directories, creating
//! directories as needed. Failures are logged per directory and do not stop
//! the remaining writes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Result of one scaffolding run.
#[derive(Debug, Default)]
pub struct ScaffoldOutcome {
    /// Full paths of successfully written files
    pub written: Vec<PathBuf>,
    /// Directories that failed, with the underlying I/O error
    pub failed: Vec<(PathBuf, io::Error)>,
}

impl ScaffoldOutcome {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

fn write_into_dir(dir: &Path, file_name: &str, content: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    fs::write(&path, content)?;
    Ok(path)
}

/// Write `file_name` with `content` into every directory in `dirs`,
/// overwriting any existing file.
pub fn write_file_to_dirs(file_name: &str, content: &str, dirs: &[PathBuf]) -> ScaffoldOutcome {
    let mut outcome = ScaffoldOutcome::default();

    for dir in dirs {
        match write_into_dir(dir, file_name, content) {
            Ok(path) => {
                info!(path = %path.display(), "Created scaffold file");
                outcome.written.push(path);
            }
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Failed to create scaffold file");
                outcome.failed.push((dir.clone(), e));
            }
        }
    }

    outcome
}
