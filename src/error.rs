//! Typed errors for configuration resolution and access.
//!
//! Every resolution error is fatal to the load that raised it: no partial
//! or best-effort merged configuration is ever returned, and none of these
//! conditions are retried.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving a configuration file and its `extends` chain.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A document failed to parse as YAML. The underlying error carries the
    /// parser-reported location.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The root document or an `extends` entry does not exist on disk.
    #[error("config file not found: {}{}", path.display(), referenced_by_suffix(referenced_by))]
    MissingFile {
        path: PathBuf,
        /// The document whose `extends` named the missing path, if any.
        referenced_by: Option<PathBuf>,
    },

    /// An `extends` chain revisited a document already on the active
    /// resolution stack.
    #[error("cyclic extends chain: {}", format_cycle(cycle))]
    CyclicExtends {
        /// The ordered cycle, starting and ending at the revisited document.
        cycle: Vec<PathBuf>,
    },

    /// The reserved `extends` key has an unsupported shape.
    #[error("invalid extends in {}: {reason}", path.display())]
    InvalidExtends { path: PathBuf, reason: String },

    /// A document exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The fully merged root is not a mapping, so no view can be built on it.
    #[error("root of {} did not resolve to a mapping", path.display())]
    RootNotMapping { path: PathBuf },
}

/// Errors raised when reading values out of a resolved configuration tree.
///
/// These occur only at access time, never during loading, and carry the
/// full dotted path that was being walked.
#[derive(Debug, Error)]
pub enum AccessError {
    /// A dotted path segment was not present in the current mapping.
    #[error("config key not found: {path}")]
    KeyNotFound { path: String },

    /// A path segment or typed accessor hit a value of the wrong shape.
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}

fn referenced_by_suffix(referenced_by: &Option<PathBuf>) -> String {
    match referenced_by {
        Some(referrer) => format!(" (referenced by {})", referrer.display()),
        None => String::new(),
    }
}

fn format_cycle(cycle: &[PathBuf]) -> String {
    cycle
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_names_referrer() {
        let err = ResolveError::MissingFile {
            path: PathBuf::from("/tmp/base.yaml"),
            referenced_by: Some(PathBuf::from("/tmp/config.yaml")),
        };
        let message = err.to_string();
        assert!(message.contains("/tmp/base.yaml"));
        assert!(message.contains("referenced by /tmp/config.yaml"));
    }

    #[test]
    fn test_missing_root_has_no_referrer_suffix() {
        let err = ResolveError::MissingFile {
            path: PathBuf::from("/tmp/config.yaml"),
            referenced_by: None,
        };
        assert!(!err.to_string().contains("referenced by"));
    }

    #[test]
    fn test_cycle_lists_paths_in_order() {
        let err = ResolveError::CyclicExtends {
            cycle: vec![
                PathBuf::from("/tmp/a.yaml"),
                PathBuf::from("/tmp/b.yaml"),
                PathBuf::from("/tmp/a.yaml"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "cyclic extends chain: /tmp/a.yaml -> /tmp/b.yaml -> /tmp/a.yaml"
        );
    }

    #[test]
    fn test_access_errors_carry_dotted_path() {
        let err = AccessError::KeyNotFound {
            path: "app.missing".to_string(),
        };
        assert_eq!(err.to_string(), "config key not found: app.missing");

        let err = AccessError::TypeMismatch {
            path: "app.port".to_string(),
            expected: "mapping",
            found: "number",
        };
        assert_eq!(
            err.to_string(),
            "type mismatch at app.port: expected mapping, found number"
        );
    }
}
