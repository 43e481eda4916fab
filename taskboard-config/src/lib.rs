//! Taskboard configuration management using Figment
//!
//! Loads the tunables of board ordering and task views from layered sources:
//!
//! 1. Compiled defaults (the board's historical constants)
//! 2. Global file: `~/.taskboard/taskboard.{toml,yaml,yml,json}`
//! 3. Project file: `./.taskboard/taskboard.{toml,yaml,yml,json}`
//! 4. Environment variables prefixed with `TASKBOARD_`
//!
//! ```no_run
//! use taskboard_config::load_configuration;
//!
//! let config = load_configuration()?;
//! println!("seed position: {}", config.seed_position);
//! # Ok::<(), taskboard_config::ConfigError>(())
//! ```
//!
//! ## Example TOML Configuration
//!
//! ```toml
//! seed_position = 65535.0
//! min_gap = 1e-9
//! rebalance_spacing = 65535.0
//! week_start = "monday"
//! ```

/// File discovery logic for configuration files
pub mod discovery;
/// Error types
pub mod error;
/// Figment-backed provider
pub mod provider;
/// Configuration value types
pub mod types;

pub use discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery, CONFIG_DIR_NAME};
pub use error::ConfigError;
pub use provider::{load_configuration, ConfigProvider, ENV_PREFIX};
pub use types::{
    BoardConfig, WeekStart, DEFAULT_MIN_GAP, DEFAULT_REBALANCE_SPACING, DEFAULT_SEED_POSITION,
};

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
