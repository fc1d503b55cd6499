//! Reference resolution for `extends` chains.
//!
//! A document may declare a top-level `extends` key naming the files it
//! inherits from. Resolution is depth-first and sequential: each ancestor is
//! itself fully resolved (recursively, with its own ancestors already
//! merged), then the ordered list of trees folds through the merge engine
//! with the declaring document last. Later `extends` entries win over
//! earlier ones; the document's own keys win over all ancestors.

use super::discovery::{self, ENV_CONFIG_PATH, LoadOptions};
use super::merge;
use super::view::{Config, value_kind};
use crate::error::ResolveError;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reserved top-level key naming the documents a config file inherits from.
///
/// Resolution metadata only; never present in the merged output.
pub const EXTENDS_KEY: &str = "extends";

/// The outcome of resolving a root document and its ancestor chain.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The fully merged tree.
    pub tree: Value,
    /// Absolute paths of every document that contributed to the merge, in
    /// merge order: most distant ancestor first, the root document last.
    /// A document shared by several branches of the chain appears once per
    /// branch, matching how the merge actually folded.
    pub documents: Vec<PathBuf>,
}

/// Resolve a configuration file and its full `extends` chain.
///
/// The merged tree has the shape of the input documents; it is not
/// required to be a mapping. Use [`load_from`] to also obtain a
/// dotted-path [`Config`] view.
pub fn resolve(path: impl AsRef<Path>) -> Result<Resolution, ResolveError> {
    let path = path.as_ref();
    let mut in_flight = Vec::new();
    let mut documents = Vec::new();
    let tree = resolve_document(path, None, &mut in_flight, &mut documents)?;
    info!(
        root = %path.display(),
        documents = documents.len(),
        "configuration resolved"
    );
    Ok(Resolution { tree, documents })
}

/// Discover the root config file and resolve it into a [`Config`].
///
/// Honors the `CONFIG_CASCADE_PATH` environment variable as an explicit
/// root file before falling back to directory discovery.
pub fn load(options: &LoadOptions) -> Result<Config, ResolveError> {
    let path = match std::env::var(ENV_CONFIG_PATH) {
        Ok(explicit) => {
            debug!(path = %explicit, "using explicit config path from environment");
            PathBuf::from(explicit)
        }
        Err(_) => discovery::discover(options)?,
    };
    load_from(path)
}

/// Resolve an explicit root config file into a [`Config`].
pub fn load_from(path: impl AsRef<Path>) -> Result<Config, ResolveError> {
    let path = path.as_ref();
    let resolution = resolve(path)?;
    if !resolution.tree.is_mapping() {
        return Err(ResolveError::RootNotMapping {
            path: path.to_path_buf(),
        });
    }
    Config::from_value(resolution.tree).map_err(|_| ResolveError::RootNotMapping {
        path: path.to_path_buf(),
    })
}

/// Resolve one document depth-first, merging its ancestors beneath it.
fn resolve_document(
    path: &Path,
    referenced_by: Option<&Path>,
    in_flight: &mut Vec<PathBuf>,
    documents: &mut Vec<PathBuf>,
) -> Result<Value, ResolveError> {
    let identity = canonical_identity(path, referenced_by)?;
    if let Some(position) = in_flight.iter().position(|entry| *entry == identity) {
        let mut cycle = in_flight[position..].to_vec();
        cycle.push(identity);
        return Err(ResolveError::CyclicExtends { cycle });
    }

    let contents = fs::read_to_string(&identity).map_err(|source| ResolveError::Io {
        path: identity.clone(),
        source,
    })?;
    let root = parse_document(&contents, &identity)?;
    let (own, extends) = split_extends(root, &identity)?;
    debug!(
        path = %identity.display(),
        ancestors = extends.len(),
        "loaded config document"
    );

    // Relative entries resolve against the declaring file's directory,
    // never the current working directory of a nested call.
    let base_dir = identity
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    in_flight.push(identity.clone());
    let mut trees = Vec::with_capacity(extends.len() + 1);
    for entry in &extends {
        let target = resolve_reference(entry, &base_dir);
        trees.push(resolve_document(
            &target,
            Some(&identity),
            in_flight,
            documents,
        )?);
    }
    in_flight.pop();

    documents.push(identity);
    trees.push(own);
    Ok(merge::merge_all(trees))
}

/// Canonical path used for cycle detection and document identity.
fn canonical_identity(
    path: &Path,
    referenced_by: Option<&Path>,
) -> Result<PathBuf, ResolveError> {
    match path.canonicalize() {
        Ok(identity) => Ok(identity),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Err(ResolveError::MissingFile {
                path: path.to_path_buf(),
                referenced_by: referenced_by.map(Path::to_path_buf),
            })
        }
        Err(source) => Err(ResolveError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Parse file contents, treating empty and null documents as empty mappings.
fn parse_document(contents: &str, path: &Path) -> Result<Value, ResolveError> {
    if contents.trim().is_empty() {
        return Ok(Value::Mapping(Mapping::new()));
    }
    let parsed: Value = serde_yaml::from_str(contents).map_err(|source| ResolveError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(match parsed {
        Value::Null => Value::Mapping(Mapping::new()),
        other => other,
    })
}

/// Strip and validate the reserved `extends` key from a document root.
///
/// Non-mapping roots carry no `extends` and pass through untouched.
fn split_extends(root: Value, path: &Path) -> Result<(Value, Vec<String>), ResolveError> {
    let Value::Mapping(mut map) = root else {
        return Ok((root, Vec::new()));
    };
    let key = Value::from(EXTENDS_KEY);
    let Some(raw) = map.shift_remove(&key) else {
        return Ok((Value::Mapping(map), Vec::new()));
    };
    let Value::Sequence(entries) = raw else {
        return Err(ResolveError::InvalidExtends {
            path: path.to_path_buf(),
            reason: format!(
                "`{EXTENDS_KEY}` must be a sequence of file paths, got {}",
                value_kind(&raw)
            ),
        });
    };
    let mut paths = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            Value::String(entry_path) => paths.push(entry_path),
            other => {
                return Err(ResolveError::InvalidExtends {
                    path: path.to_path_buf(),
                    reason: format!(
                        "`{EXTENDS_KEY}` entries must be strings, got {}",
                        value_kind(&other)
                    ),
                });
            }
        }
    }
    Ok((Value::Mapping(map), paths))
}

/// Resolve one `extends` entry against the declaring file's directory.
fn resolve_reference(entry: &str, base_dir: &Path) -> PathBuf {
    let entry = Path::new(entry);
    if entry.is_absolute() {
        entry.to_path_buf()
    } else {
        base_dir.join(entry)
    }
}
