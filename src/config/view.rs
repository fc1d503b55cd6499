//! Read-only dotted-path access over a merged configuration tree.
//!
//! `Config` owns the final merged tree; `ConfigView` is a cheap borrowed
//! cursor into it. Dotted paths walk nested mappings only; sequences are
//! addressed by index through [`ConfigView::index`] or
//! [`ConfigView::as_sequence`]. No operation mutates the underlying tree.

use crate::error::AccessError;
use serde_yaml::Value;
use std::fmt;
use std::sync::Arc;

/// Display label for the root of the tree in error paths.
const ROOT_LABEL: &str = "(root)";

/// An immutable, fully merged configuration.
///
/// Construction is the only state transition; afterwards the tree is
/// read-only for the lifetime of the value. Cloning is cheap (the tree is
/// behind an `Arc`).
#[derive(Debug, Clone)]
pub struct Config {
    root: Arc<Value>,
}

impl Config {
    /// Wrap an already merged tree. The root must be a mapping.
    pub fn from_value(root: Value) -> Result<Self, AccessError> {
        if !root.is_mapping() {
            return Err(AccessError::TypeMismatch {
                path: ROOT_LABEL.to_string(),
                expected: "mapping",
                found: value_kind(&root),
            });
        }
        Ok(Self {
            root: Arc::new(root),
        })
    }

    /// A cursor positioned at the root mapping.
    pub fn root(&self) -> ConfigView<'_> {
        ConfigView {
            value: &self.root,
            path: String::new(),
        }
    }

    /// Walk a dotted path from the root, e.g. `config.get("app.port")`.
    pub fn get(&self, path: &str) -> Result<ConfigView<'_>, AccessError> {
        self.root().get(path)
    }

    /// The underlying merged tree.
    pub fn value(&self) -> &Value {
        &self.root
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root(), f)
    }
}

/// A read-only cursor into a configuration tree.
///
/// Carries the dotted path walked so far, so access errors can name the
/// exact location that failed.
#[derive(Debug, Clone)]
pub struct ConfigView<'a> {
    value: &'a Value,
    path: String,
}

impl<'a> ConfigView<'a> {
    /// Walk a dotted path of mapping keys from this node.
    ///
    /// Fails with [`AccessError::KeyNotFound`] when a segment is absent and
    /// with [`AccessError::TypeMismatch`] when a segment lands on a
    /// non-mapping before the path is exhausted.
    pub fn get(&self, path: &str) -> Result<ConfigView<'a>, AccessError> {
        let mut value = self.value;
        let mut walked = self.path.clone();
        for segment in path.split('.') {
            let Value::Mapping(map) = value else {
                return Err(AccessError::TypeMismatch {
                    path: display_path(&walked),
                    expected: "mapping",
                    found: value_kind(value),
                });
            };
            push_segment(&mut walked, segment);
            value = map.get(segment).ok_or_else(|| AccessError::KeyNotFound {
                path: walked.clone(),
            })?;
        }
        Ok(ConfigView {
            value,
            path: walked,
        })
    }

    /// Like [`ConfigView::get`], but collapses any access failure to `None`.
    pub fn get_or(&self, path: &str) -> Option<ConfigView<'a>> {
        self.get(path).ok()
    }

    /// The dotted path of this node from the root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The underlying tree node.
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// String scalar at this node.
    pub fn as_str(&self) -> Result<&'a str, AccessError> {
        self.value
            .as_str()
            .ok_or_else(|| self.mismatch("string"))
    }

    /// Signed integer scalar at this node.
    pub fn as_i64(&self) -> Result<i64, AccessError> {
        self.value
            .as_i64()
            .ok_or_else(|| self.mismatch("integer"))
    }

    /// Unsigned integer scalar at this node.
    pub fn as_u64(&self) -> Result<u64, AccessError> {
        self.value
            .as_u64()
            .ok_or_else(|| self.mismatch("unsigned integer"))
    }

    /// Floating point scalar at this node. Integers widen losslessly.
    pub fn as_f64(&self) -> Result<f64, AccessError> {
        self.value
            .as_f64()
            .ok_or_else(|| self.mismatch("number"))
    }

    /// Boolean scalar at this node.
    pub fn as_bool(&self) -> Result<bool, AccessError> {
        self.value
            .as_bool()
            .ok_or_else(|| self.mismatch("boolean"))
    }

    /// Whether this node is an explicit null.
    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    /// The elements of a sequence node, each wrapped for further access.
    pub fn as_sequence(&self) -> Result<Vec<ConfigView<'a>>, AccessError> {
        let Value::Sequence(items) = self.value else {
            return Err(self.mismatch("sequence"));
        };
        Ok(items
            .iter()
            .enumerate()
            .map(|(i, item)| ConfigView {
                value: item,
                path: format!("{}[{i}]", display_path(&self.path)),
            })
            .collect())
    }

    /// A single sequence element by position.
    pub fn index(&self, index: usize) -> Result<ConfigView<'a>, AccessError> {
        let Value::Sequence(items) = self.value else {
            return Err(self.mismatch("sequence"));
        };
        let indexed = format!("{}[{index}]", display_path(&self.path));
        match items.get(index) {
            Some(item) => Ok(ConfigView {
                value: item,
                path: indexed,
            }),
            None => Err(AccessError::KeyNotFound { path: indexed }),
        }
    }

    /// String keys of a mapping node, in tree order.
    pub fn keys(&self) -> Result<Vec<&'a str>, AccessError> {
        let Value::Mapping(map) = self.value else {
            return Err(self.mismatch("mapping"));
        };
        Ok(map.keys().filter_map(Value::as_str).collect())
    }

    /// Whether a mapping node contains the given key. False on non-mappings.
    pub fn contains(&self, key: &str) -> bool {
        match self.value {
            Value::Mapping(map) => map.contains_key(key),
            _ => false,
        }
    }

    fn mismatch(&self, expected: &'static str) -> AccessError {
        AccessError::TypeMismatch {
            path: display_path(&self.path),
            expected,
            found: value_kind(self.value),
        }
    }
}

impl fmt::Display for ConfigView<'_> {
    /// Renders the subtree as pretty-printed JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string_pretty(self.value) {
            Ok(rendered) => f.write_str(&rendered),
            Err(_) => write!(f, "<unprintable config value at {}>", display_path(&self.path)),
        }
    }
}

/// Shape name used in error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

fn push_segment(walked: &mut String, segment: &str) {
    if !walked.is_empty() {
        walked.push('.');
    }
    walked.push_str(segment);
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        ROOT_LABEL.to_string()
    } else {
        path.to_string()
    }
}
