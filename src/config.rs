//! Configuration management for SmartAttend

use crate::schedule::colors::default_palette;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> String {
    "smartattend.db".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Course colors, handed out in first-seen order
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
    /// Whether an existing schedule's days may be changed
    #[serde(default)]
    pub allow_day_edit: bool,
    /// Days-per-week policy for tenants that haven't set one
    #[serde(default = "default_days_per_week")]
    pub default_days_per_week: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            allow_day_edit: false,
            default_days_per_week: default_days_per_week(),
        }
    }
}

fn default_days_per_week() -> String {
    "1".to_string()
}

impl Config {
    /// Load configuration from smartattend.toml
    pub fn load() -> Result<Self> {
        Self::load_from("smartattend.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Try to load from file first
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;

            let config = Self::from_toml(&content)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?;
            return Ok(config);
        }

        // Fall back to environment variables only
        Self::from_env()
    }

    /// Parse a TOML document, expanding ${VAR} references
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.expand_env_vars();
        Ok(config)
    }

    /// Load configuration entirely from environment variables
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("SMARTATTEND_PORT") {
            Ok(p) => p
                .parse()
                .with_context(|| format!("Invalid SMARTATTEND_PORT: {}", p))?,
            Err(_) => default_port(),
        };

        Ok(Config {
            server: ServerConfig {
                host: std::env::var("SMARTATTEND_HOST").unwrap_or_else(|_| default_host()),
                port,
            },
            database: DatabaseConfig {
                path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| default_db_path()),
            },
            schedule: ScheduleConfig {
                palette: std::env::var("SCHEDULE_PALETTE")
                    .ok()
                    .map(|s| parse_palette(&s))
                    .filter(|p| !p.is_empty())
                    .unwrap_or_else(default_palette),
                allow_day_edit: std::env::var("ALLOW_DAY_EDIT")
                    .map(|v| {
                        matches!(
                            v.trim().to_lowercase().as_str(),
                            "1" | "true" | "yes" | "on"
                        )
                    })
                    .unwrap_or(false),
                default_days_per_week: std::env::var("DEFAULT_DAYS_PER_WEEK")
                    .unwrap_or_else(|_| default_days_per_week()),
            },
        })
    }

    /// Expand ${VAR} patterns in string fields
    fn expand_env_vars(&mut self) {
        self.server.host = expand_env(&self.server.host);
        self.database.path = expand_env(&self.database.path);
        self.schedule.default_days_per_week = expand_env(&self.schedule.default_days_per_week);
    }
}

/// Split a comma-separated color list
fn parse_palette(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

/// Expand ${VAR} patterns in a string
fn expand_env(s: &str) -> String {
    let mut result = s.to_string();

    // Find all ${VAR} patterns
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let replacement = std::env::var(var_name).unwrap_or_default();
            result = format!("{}{}{}", &result[..start], replacement, &result[start + end + 1..]);
        } else {
            break;
        }
    }

    result
}
