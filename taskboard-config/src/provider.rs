//! Configuration provider using Figment

use crate::{
    discovery::{ConfigFile, ConfigFormat, FileDiscovery},
    types::BoardConfig,
    ConfigResult,
};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use tracing::{debug, info, trace};

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "TASKBOARD_";

/// Loads [`BoardConfig`] from every source in precedence order.
///
/// No caching is performed; each call reads the files again.
#[derive(Debug, Default, Clone)]
pub struct ConfigProvider {
    discovery: FileDiscovery,
}

impl ConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific discovery instead of the cwd/home lookup
    pub fn with_discovery(discovery: FileDiscovery) -> Self {
        Self { discovery }
    }

    /// Extract and validate the board configuration
    pub fn load(&self) -> ConfigResult<BoardConfig> {
        debug!("Loading board configuration");

        let config: BoardConfig = self.build_figment().extract()?;
        config.validate()?;

        info!(
            seed_position = config.seed_position,
            min_gap = config.min_gap,
            rebalance_spacing = config.rebalance_spacing,
            week_start = ?config.week_start,
            "Loaded board configuration"
        );
        Ok(config)
    }

    /// Build the figment with all sources, later sources overriding earlier ones:
    /// 1. Compiled defaults
    /// 2. Discovered configuration files (global, then project)
    /// 3. `TASKBOARD_` environment variables
    pub fn build_figment(&self) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(BoardConfig::default()))
            .merge(self.load_discovered_config_files())
            .merge(Self::load_env_vars())
    }

    fn load_discovered_config_files(&self) -> Figment {
        self.discovery
            .discover_all()
            .iter()
            .fold(Figment::new(), |figment, file| {
                trace!(
                    "Loading config file: {} ({:?})",
                    file.path.display(),
                    file.format
                );
                figment.merge(Self::load_config_file(file))
            })
    }

    fn load_config_file(config_file: &ConfigFile) -> Figment {
        let path = &config_file.path;
        match config_file.format {
            ConfigFormat::Toml => Figment::from(Toml::file(path)),
            ConfigFormat::Yaml => Figment::from(Yaml::file(path)),
            ConfigFormat::Json => Figment::from(Json::file(path)),
        }
    }

    fn load_env_vars() -> Env {
        Env::prefixed(ENV_PREFIX).split("__")
    }
}

/// Load the board configuration from all available sources
pub fn load_configuration() -> ConfigResult<BoardConfig> {
    ConfigProvider::new().load()
}
