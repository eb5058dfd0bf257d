//! Configuration surface for buildmeta.
//!
//! This crate handles:
//! - Reading action inputs (`INPUT_*` variables) into a typed record
//! - Parsing delimited list inputs
//! - Runtime settings taken from the environment

pub mod inputs;
pub mod list;
pub mod settings;

pub use inputs::{EnvInputs, InputSource, Inputs, read_inputs};
pub use list::{ListOptions, parse_list};
pub use settings::Settings;
