use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Delay before measuring geometry, lets the host layout settle
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,
    /// Fraction of the viewport height the active link is biased down
    /// from the top edge after an adjustment (0.0 = flush to top)
    #[serde(default = "default_top_bias")]
    pub top_bias: f64,
    /// Read the reduced-motion preference at startup
    #[serde(default = "default_true")]
    pub respect_reduced_motion: bool,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay(),
            top_bias: default_top_bias(),
            respect_reduced_motion: default_true(),
        }
    }
}

impl ScrollConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_tick_rate() -> u64 {
    100
}

fn default_settle_delay() -> u64 {
    100
}

fn default_top_bias() -> f64 {
    0.2
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/sidenav/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("sidenav")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scroll_config() {
        let config = ScrollConfig::default();
        assert_eq!(config.settle_delay_ms, 100);
        assert!((config.top_bias - 0.2).abs() < f64::EPSILON);
        assert!(config.respect_reduced_motion);
    }

    #[test]
    fn test_settle_delay_duration() {
        let config = ScrollConfig {
            settle_delay_ms: 250,
            ..Default::default()
        };
        assert_eq!(config.settle_delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_parse_partial_config() {
        let config: AppConfig = toml::from_str(
            r#"
            [scroll]
            top_bias = 0.1
            "#,
        )
        .unwrap();
        assert!((config.scroll.top_bias - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.scroll.settle_delay_ms, 100);
        assert_eq!(config.ui.tick_rate_ms, 100);
    }
}
