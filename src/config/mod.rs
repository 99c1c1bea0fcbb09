//! Configuration module for tablecheck.
//!
//! Handles warehouse configuration, environment variables, and settings.

mod settings;
mod warehouse;

pub use settings::{
    expand_env_vars, OutputSettings, Settings, SettingsError, SourceSettings, TransformSettings,
    WarehouseSettings,
};
pub use warehouse::{split_dataset, Driver, WarehouseConfig, WarehouseConfigError};
