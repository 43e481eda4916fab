//! Configuration file discovery
//!
//! Looks for `taskboard.{toml,yaml,yml,json}` inside a `.taskboard/` directory
//! in the user's home (global scope) and in the current directory (project
//! scope). Project files win over global ones.

use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Directory name holding configuration files in both scopes
pub const CONFIG_DIR_NAME: &str = ".taskboard";

const CONFIG_FILE_NAMES: [&str; 4] = [
    "taskboard.toml",
    "taskboard.yaml",
    "taskboard.yml",
    "taskboard.json",
];

/// Represents a discovered configuration file with metadata
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Full path to the configuration file
    pub path: PathBuf,
    /// Detected format of the file
    pub format: ConfigFormat,
    /// Where the file was found
    pub scope: ConfigScope,
}

impl ConfigFile {
    pub fn new(path: PathBuf, format: ConfigFormat, scope: ConfigScope) -> Self {
        Self {
            path,
            format,
            scope,
        }
    }

    /// Priority for ordering (higher values take precedence)
    pub fn priority(&self) -> u8 {
        self.scope.priority()
    }
}

/// Configuration file format detected from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Configuration scope indicating where the file was discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    /// `~/.taskboard/`
    Global,
    /// `./.taskboard/`
    Project,
}

impl ConfigScope {
    /// Get priority value for this scope (higher values override lower ones)
    pub fn priority(self) -> u8 {
        match self {
            Self::Global => 10,
            Self::Project => 20,
        }
    }
}

/// File discovery service for finding configuration files
#[derive(Debug, Default, Clone)]
pub struct FileDiscovery {
    project_dir: Option<PathBuf>,
    global_dir: Option<PathBuf>,
}

impl FileDiscovery {
    /// Create a discovery that resolves both directories lazily at discovery time
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a discovery rooted at explicit directories instead of cwd and home
    pub fn with_directories(project_dir: Option<PathBuf>, global_dir: Option<PathBuf>) -> Self {
        Self {
            project_dir,
            global_dir,
        }
    }

    /// Discover all configuration files, lowest priority first so that
    /// later files override earlier ones when merged.
    pub fn discover_all(&self) -> Vec<ConfigFile> {
        let project_dir = self.project_dir.clone().or_else(Self::resolve_project_dir);
        let global_dir = self.global_dir.clone().or_else(Self::resolve_global_dir);

        let mut files = Vec::new();
        if let Some(ref dir) = global_dir {
            files.extend(self.search_directory(dir, ConfigScope::Global));
        }
        if let Some(ref dir) = project_dir {
            files.extend(self.search_directory(dir, ConfigScope::Project));
        }

        files.sort_by_key(ConfigFile::priority);

        debug!("Discovered {} configuration files", files.len());
        for file in &files {
            trace!("Found config: {} ({:?})", file.path.display(), file.format);
        }

        files
    }

    fn search_directory(&self, dir: &Path, scope: ConfigScope) -> Vec<ConfigFile> {
        if !dir.exists() {
            debug!("Directory does not exist: {}", dir.display());
            return Vec::new();
        }

        if !dir.is_dir() {
            warn!("Path exists but is not a directory: {}", dir.display());
            return Vec::new();
        }

        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .filter(|candidate| candidate.is_file())
            .filter_map(|candidate| Self::classify_file(&candidate, scope))
            .collect()
    }

    fn classify_file(path: &Path, scope: ConfigScope) -> Option<ConfigFile> {
        let extension = path.extension()?.to_str()?;
        let format = ConfigFormat::from_extension(extension)?;
        Some(ConfigFile::new(path.to_path_buf(), format, scope))
    }

    fn resolve_project_dir() -> Option<PathBuf> {
        let dir = std::env::current_dir().ok()?.join(CONFIG_DIR_NAME);
        dir.is_dir().then_some(dir)
    }

    fn resolve_global_dir() -> Option<PathBuf> {
        let dir = dirs::home_dir()?.join(CONFIG_DIR_NAME);
        dir.is_dir().then_some(dir)
    }
}
