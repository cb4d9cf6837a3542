use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

// =============================================================================
// Managed tool defaults
// =============================================================================

/// Binary managed when no configuration says otherwise
pub const DEFAULT_TOOL_NAME: &str = "talosctl";

/// GitHub repository publishing the binary
pub const DEFAULT_REPO_OWNER: &str = "siderolabs";
pub const DEFAULT_REPO_NAME: &str = "talos";

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

// =============================================================================
// Transport constants
// =============================================================================

/// Largest page size the GitHub API accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// Timeout for establishing HTTP connections (30 seconds)
pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Environment variables
// =============================================================================

/// Overrides the root directory (`~/.toolenv`)
pub const HOME_ENV: &str = "TOOLENV_HOME";

/// `EnvFilter` directives for logging
pub const LOG_ENV: &str = "TOOLENV_LOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Contents of `config.json`
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolenvConfig {
    pub tool: ToolConfig,
    pub github: GitHubConfig,
    pub paths: PathsConfig,
}

/// Which binary is managed and where it is released
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolConfig {
    pub name: String,
    pub owner: String,
    pub repo: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_TOOL_NAME.to_string(),
            owner: DEFAULT_REPO_OWNER.to_string(),
            repo: DEFAULT_REPO_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GitHubConfig {
    pub api_url: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_GITHUB_API_URL.to_string(),
        }
    }
}

/// Directory overrides
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PathsConfig {
    pub bin_dir: Option<PathBuf>,
    pub versions_dir: Option<PathBuf>,
}

impl ToolenvConfig {
    /// Load configuration from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Directories an invocation operates on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Holds the active-version alias
    pub bin_dir: PathBuf,
    /// Holds one file per installed version
    pub versions_dir: PathBuf,
}

impl Layout {
    /// Resolve directories. Command-line flags win over the config file,
    /// which wins over `<root>/bin` and `<root>/versions`.
    pub fn resolve(
        root: &Path,
        paths: &PathsConfig,
        bin_flag: Option<PathBuf>,
        versions_flag: Option<PathBuf>,
    ) -> Self {
        Self {
            bin_dir: bin_flag
                .or_else(|| paths.bin_dir.clone())
                .unwrap_or_else(|| root.join("bin")),
            versions_dir: versions_flag
                .or_else(|| paths.versions_dir.clone())
                .unwrap_or_else(|| root.join("versions")),
        }
    }
}

/// Returns the root directory for toolenv state.
/// Uses $TOOLENV_HOME if set, otherwise ~/.toolenv,
/// or ./.toolenv if no home directory is available.
pub fn root_dir() -> PathBuf {
    root_dir_with_env(std::env::var(HOME_ENV).ok(), dirs::home_dir())
}

/// Returns the path to the configuration file.
pub fn config_path(root: &Path) -> PathBuf {
    root.join("config.json")
}

/// Returns the path to the log file.
pub fn log_path(root: &Path) -> PathBuf {
    root.join("toolenv.log")
}

fn root_dir_with_env(toolenv_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    toolenv_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".toolenv")))
        .unwrap_or_else(|| PathBuf::from(".toolenv"))
}
