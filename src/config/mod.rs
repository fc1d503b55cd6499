//! Configuration resolution engine.
//!
//! Resolves a root YAML document and its `extends` ancestor chain into one
//! merged tree:
//! 1. **Parse** - each document is read as a `serde_yaml::Value`
//! 2. **Resolve** - `extends` entries load depth-first, in declared order,
//!    relative to the file that declares them
//! 3. **Merge** - the ordered trees fold left to right, most specific last
//!
//! ## Merge strategy
//! - Mappings merge field-by-field; later documents override earlier ones
//! - Sequences and scalars are replaced entirely, never merged element-wise
//! - An explicit null override replaces the base value
//!
//! ## Environment variables
//! - `CONFIG_CASCADE_PATH` - explicit root config file (skips discovery)
//! - `CONFIG_CASCADE_ROOT` - directory discovery starts from

mod discovery;
mod merge;
mod resolver;
mod view;

pub mod global;

pub use discovery::{
    DEFAULT_CONFIG_FILE_NAME, DEFAULT_PROJECT_ROOT_MARKERS, ENV_CONFIG_PATH, ENV_CONFIG_ROOT,
    LoadOptions, discover,
};
pub use merge::{merge_all, merge_two};
pub use resolver::{EXTENDS_KEY, Resolution, load, load_from, resolve};
pub use view::{Config, ConfigView};
