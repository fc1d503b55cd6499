//! Layered YAML configuration with `extends`-chain inheritance.
//!
//! A config file may name the files it inherits from in a reserved
//! top-level `extends` key; resolution deep-merges the whole ancestor
//! chain into one immutable tree exposed through dotted-path access.

pub mod cli;
pub mod config;
pub mod error;
