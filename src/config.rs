//! # Terminal configuration
//!
//! Everything is optional; a missing default config file means built-in
//! defaults.
//!
//! ```toml
//! [server]
//! addr = "0.0.0.0:8080"
//!
//! [hardware]
//! board_compatible = "xunlong,orangepi-one"   # skip device-tree probing
//! compatible_path = "/proc/device-tree/compatible"
//! gpio_root = "/sys/class/gpio"
//!
//! [admin]
//! username = "admin"
//! password = "admin"
//! session_ttl_secs = 3600
//!
//! [web]
//! template_dir = "web"
//! ```
//!
//! `PISO_HTTP_ADDR` and `PISO_BOARD_COMPATIBLE` override the file, and the
//! `--addr` / `--board` flags override both.

use crate::hardware::{BoardDetector, SysfsGpio, DEVICE_TREE_COMPATIBLE, SYSFS_GPIO_ROOT};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "piso.toml";
pub const HTTP_ADDR_ENV: &str = "PISO_HTTP_ADDR";
pub const BOARD_OVERRIDE_ENV: &str = "PISO_BOARD_COMPATIBLE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub hardware: HardwareConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub web: WebConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { addr: default_addr() }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HardwareConfig {
    /// Compatible string that bypasses device-tree probing.
    #[serde(default)]
    pub board_compatible: Option<String>,
    #[serde(default = "default_compatible_path")]
    pub compatible_path: PathBuf,
    #[serde(default = "default_gpio_root")]
    pub gpio_root: PathBuf,
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            board_compatible: None,
            compatible_path: default_compatible_path(),
            gpio_root: default_gpio_root(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin")]
    pub username: String,
    #[serde(default = "default_admin")]
    pub password: String,
    /// Sessions never expire when unset.
    #[serde(default)]
    pub session_ttl_secs: Option<u64>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin(),
            password: default_admin(),
            session_ttl_secs: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebConfig {
    /// Directory holding optional `client_portal.html`, `admin.html` and `admin_login.html`.
    #[serde(default = "default_template_dir")]
    pub template_dir: PathBuf,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            template_dir: default_template_dir(),
        }
    }
}

fn default_addr() -> String {
    "0.0.0.0:8080".to_string()
}
fn default_compatible_path() -> PathBuf {
    PathBuf::from(DEVICE_TREE_COMPATIBLE)
}
fn default_gpio_root() -> PathBuf {
    PathBuf::from(SYSFS_GPIO_ROOT)
}
fn default_admin() -> String {
    "admin".to_string()
}
fn default_template_dir() -> PathBuf {
    PathBuf::from("web")
}

/// A bare `:port` listens on every interface.
pub fn normalize_addr(addr: &str) -> String {
    if addr.starts_with(':') {
        format!("0.0.0.0{addr}")
    } else {
        addr.to_string()
    }
}

impl Config {
    /// Apply overrides from a variable lookup; empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());
        if let Some(addr) = lookup(HTTP_ADDR_ENV) {
            tracing::debug!("{} overrides server address: {}", HTTP_ADDR_ENV, addr);
            self.server.addr = addr;
        }
        if let Some(board) = lookup(BOARD_OVERRIDE_ENV) {
            tracing::debug!("{} overrides board: {}", BOARD_OVERRIDE_ENV, board);
            self.hardware.board_compatible = Some(board);
        }
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Command-line values win over the file and the environment.
    pub fn apply_cli(&mut self, addr: Option<String>, board: Option<String>) {
        if let Some(addr) = addr {
            self.server.addr = addr;
        }
        if let Some(board) = board {
            self.hardware.board_compatible = Some(board);
        }
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = normalize_addr(&self.server.addr);
        addr.parse()
            .map_err(|e| ConfigError::Invalid(format!("server.addr '{}': {}", self.server.addr, e)))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.listen_addr()?;
        if self.admin.username.is_empty() {
            return Err(ConfigError::Invalid("admin.username must not be empty".to_string()));
        }
        if self.admin.session_ttl_secs == Some(0) {
            return Err(ConfigError::Invalid("admin.session_ttl_secs must be > 0".to_string()));
        }
        Ok(())
    }

    pub fn board_detector(&self) -> BoardDetector {
        BoardDetector::new()
            .with_override(self.hardware.board_compatible.clone())
            .with_compatible_path(&self.hardware.compatible_path)
    }

    pub fn gpio(&self) -> SysfsGpio {
        SysfsGpio::new(&self.hardware.gpio_root)
    }
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::error!("Failed to parse config TOML: {}", e);
                Err(ConfigError::Toml(e))
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file '{}': {}", path.display(), e);
            Err(ConfigError::Io(e))
        }
    }
}

/// Load `path`, falling back to defaults when the implicit default file is absent.
pub fn load_or_default(path: &Path, explicit: bool) -> Result<Config, ConfigError> {
    if !explicit && !path.exists() {
        tracing::info!("No config file at '{}'; using defaults", path.display());
        return Ok(Config::default());
    }
    load_config(path)
}
