//! Locating the root configuration file on disk.
//!
//! Discovery checks, in order: the starting directory itself, the nearest
//! project root (identified by marker entries such as `.git`), then each
//! ancestor of the starting directory. The first existing file wins.

use crate::error::ResolveError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default configuration file name searched for during discovery.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "config.yaml";

/// Marker files/dirs that identify a project root.
pub const DEFAULT_PROJECT_ROOT_MARKERS: &[&str] = &[".git", ".gitignore", "Cargo.toml"];

/// Environment variable naming an explicit root config file (skips discovery).
pub const ENV_CONFIG_PATH: &str = "CONFIG_CASCADE_PATH";

/// Environment variable naming the directory discovery starts from.
pub const ENV_CONFIG_ROOT: &str = "CONFIG_CASCADE_ROOT";

/// Options controlling discovery and loading of the root config file.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Config file name searched for in each candidate directory.
    pub file_name: String,
    /// Directory discovery starts from. Defaults to `CONFIG_CASCADE_ROOT`
    /// when set, otherwise the process current directory.
    pub start_dir: Option<PathBuf>,
    /// Marker files/dirs used to detect the project root.
    pub markers: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_CONFIG_FILE_NAME.to_string(),
            start_dir: None,
            markers: DEFAULT_PROJECT_ROOT_MARKERS
                .iter()
                .map(|marker| marker.to_string())
                .collect(),
        }
    }
}

impl LoadOptions {
    /// Options that start discovery from an explicit directory.
    pub fn with_start_dir(start_dir: impl AsRef<Path>) -> Self {
        Self {
            start_dir: Some(start_dir.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    /// Override the config file name searched for.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }
}

/// Find the most appropriate location of the configuration file.
///
/// Fails with [`ResolveError::MissingFile`] naming the primary candidate
/// (`<start_dir>/<file_name>`) when no candidate exists.
pub fn discover(options: &LoadOptions) -> Result<PathBuf, ResolveError> {
    let start = start_dir(options)?;
    let candidate = start.join(&options.file_name);
    if candidate.is_file() {
        return Ok(candidate);
    }

    if let Some(project_root) = find_project_root(&start, &options.markers) {
        let root_candidate = project_root.join(&options.file_name);
        if root_candidate.is_file() {
            debug!(
                path = %root_candidate.display(),
                "config found at project root"
            );
            return Ok(root_candidate);
        }
    }

    for ancestor in start.ancestors().skip(1) {
        let parent_candidate = ancestor.join(&options.file_name);
        if parent_candidate.is_file() {
            debug!(
                path = %parent_candidate.display(),
                "config found in ancestor directory"
            );
            return Ok(parent_candidate);
        }
    }

    Err(ResolveError::MissingFile {
        path: candidate,
        referenced_by: None,
    })
}

fn start_dir(options: &LoadOptions) -> Result<PathBuf, ResolveError> {
    if let Some(ref dir) = options.start_dir {
        return Ok(dir.clone());
    }
    if let Ok(root) = std::env::var(ENV_CONFIG_ROOT) {
        return Ok(PathBuf::from(root));
    }
    std::env::current_dir().map_err(|source| ResolveError::Io {
        path: PathBuf::from("."),
        source,
    })
}

/// Walk ancestors to find a directory containing any marker entries.
fn find_project_root(start: &Path, markers: &[String]) -> Option<PathBuf> {
    for ancestor in start.ancestors() {
        if markers.iter().any(|marker| ancestor.join(marker).exists()) {
            return Some(ancestor.to_path_buf());
        }
    }
    None
}
