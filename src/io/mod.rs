/// Command-line parsing and end-to-end generation runs
pub mod cli;
/// Constants, tileset definitions and TOML configuration
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Text rendering of generated grids
pub mod export;
/// Log subscriber setup
pub mod logging;
/// Preset placement before solving
pub mod prefill;
/// Progress reporting during generation
pub mod progress;
