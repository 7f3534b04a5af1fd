//! Configuration management for the Game of Life runner

pub mod settings;

pub use settings::{
    Settings, SimulationConfig, OutputConfig, LoggingConfig,
    EdgePolicy, BoardFormat, CliOverrides, default_config_path
};
