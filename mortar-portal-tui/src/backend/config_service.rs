//! 配置服务
//!
//! 配置以 JSON 保存在 `<config_dir>/mortar-portal/config.json`。
//! 文件不存在时使用默认值；`MORTAR_PORTAL_API_URL` 可以临时覆盖 API 地址，
//! 覆盖值只在内存中生效，不会写回文件。

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::state::Theme;

/// 覆盖 API 地址的环境变量
pub const API_URL_ENV: &str = "MORTAR_PORTAL_API_URL";

/// 默认 API 地址：本机端口转发后的 portal 服务
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// 应用配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub theme: Theme,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            theme: Theme::Dark,
        }
    }
}

impl AppConfig {
    /// 用环境变量的值覆盖 API 地址；空值忽略
    #[must_use]
    pub fn with_api_url_override(mut self, value: Option<String>) -> Self {
        if let Some(url) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            log::info!("Using API endpoint from {API_URL_ENV}: {url}");
            self.api_base_url = url;
        }
        self
    }
}

/// 配置服务 trait
pub trait ConfigService: Send + Sync {
    /// 加载配置
    fn load(&self) -> Result<AppConfig>;

    /// 保存配置
    fn save(&self, config: &AppConfig) -> Result<()>;

    /// 配置文件位置（用于设置页展示）
    fn location(&self) -> Option<&Path>;
}

/// 基于 JSON 文件的配置服务
pub struct JsonConfigService {
    /// 无法确定配置目录时为 None，此时只使用默认值
    path: Option<PathBuf>,
}

impl JsonConfigService {
    /// 平台默认位置
    pub fn default_location() -> Self {
        Self {
            path: dirs::config_dir().map(|dir| dir.join("mortar-portal").join("config.json")),
        }
    }

    #[cfg(test)]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }
}

impl ConfigService for JsonConfigService {
    fn load(&self) -> Result<AppConfig> {
        let Some(path) = self.path.as_deref() else {
            return Ok(AppConfig::default());
        };
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    fn save(&self, config: &AppConfig) -> Result<()> {
        let Some(path) = self.path.as_deref() else {
            anyhow::bail!("no config directory available on this platform");
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }

        let content = serde_json::to_string_pretty(config)?;
        fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
        log::debug!("Saved config to {}", path.display());
        Ok(())
    }

    fn location(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn temp_config(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "mortar-portal-config-{}-{name}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir.join("config.json")
    }

    #[test]
    fn missing_file_gives_defaults() {
        let service = JsonConfigService::with_path(temp_config("missing"));
        let config = assert_ok!(service.load());
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api_base_url, "http://localhost:8080");
    }

    #[test]
    fn save_then_load() {
        let path = temp_config("save");
        let service = JsonConfigService::with_path(&path);
        let config = AppConfig {
            api_base_url: "https://portal.example.com".to_string(),
            theme: Theme::Light,
        };
        assert_ok!(service.save(&config));
        assert_eq!(assert_ok!(service.load()), config);

        let raw = assert_ok!(fs::read_to_string(&path));
        assert!(raw.contains("\"theme\": \"light\""));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let path = temp_config("partial");
        assert_ok!(fs::create_dir_all(path.parent().unwrap()));
        assert_ok!(fs::write(&path, r#"{ "theme": "light" }"#));

        let config = assert_ok!(JsonConfigService::with_path(&path).load());
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = temp_config("malformed");
        assert_ok!(fs::create_dir_all(path.parent().unwrap()));
        assert_ok!(fs::write(&path, "{ not json"));

        let err = assert_err!(JsonConfigService::with_path(&path).load());
        assert!(err.to_string().starts_with("parsing"));
    }

    #[test]
    fn env_override_ignores_blank_values() {
        let config = AppConfig::default().with_api_url_override(Some("  ".to_string()));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);

        let config = config.with_api_url_override(Some("http://10.0.0.5:9000".to_string()));
        assert_eq!(config.api_base_url, "http://10.0.0.5:9000");

        let config = config.with_api_url_override(None);
        assert_eq!(config.api_base_url, "http://10.0.0.5:9000");
    }
}
