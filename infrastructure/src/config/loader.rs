//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Environment: `GAM_MCP_*` (e.g. `GAM_MCP_GAM__TIMEOUT_SECS`)
    /// 3. Project root: `./gam-mcp.toml` or `./.gam-mcp.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/gam-mcp/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        for filename in &["gam-mcp.toml", ".gam-mcp.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
                break;
            }
        }

        figment = figment.merge(Env::prefixed("GAM_MCP_").split("__"));

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/gam-mcp/config.toml if set,
    /// otherwise falls back to ~/.config/gam-mcp/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("gam-mcp").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        for filename in &["gam-mcp.toml", ".gam-mcp.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                return Some(path);
            }
        }
        None
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        eprintln!("Configuration sources (in priority order):");

        if let Some(path) = Self::project_config_path() {
            eprintln!("  [FOUND] Project: {}", path.display());
        } else {
            eprintln!("  [     ] Project: ./gam-mcp.toml or ./.gam-mcp.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                eprintln!("  [FOUND] Global:  {}", path.display());
            } else {
                eprintln!("  [     ] Global:  {}", path.display());
            }
        }

        eprintln!("  [     ] Default: built-in defaults");
    }
}
