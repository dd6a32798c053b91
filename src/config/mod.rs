//! Configuration module for relmap.
//!
//! Handles the config file, environment variables, and settings.

mod settings;

pub use settings::{
    expand_env_vars, AnalysisSettings, LoggingSettings, OutputFormat, OutputSettings, Settings,
    SettingsError,
};
