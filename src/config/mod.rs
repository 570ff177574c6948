//! Configuration loading

mod settings;

pub use settings::{BinarySettings, KEYS, Settings, unknown_key};
