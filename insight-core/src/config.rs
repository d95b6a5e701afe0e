use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_BLOCKED_KEYWORDS: [&str; 8] = [
    "shower", "politics", "trump", "war", "navy", "smoke", "military", "game",
];

/// User-facing copy shown by the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub missing_keyword: String,
    pub launch_failed: String,
    pub poll_failed: String,
    pub report_ready: String,
    pub report_failed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            missing_keyword: "请输入关键词！".to_string(),
            launch_failed: "启动任务失败，请检查后端服务或网络。".to_string(),
            poll_failed: "查询进度失败，连接可能已断开。".to_string(),
            report_ready: "点击查看洞察报告".to_string(),
            report_failed: "生成报告失败".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub server_url: String,
    pub request_timeout_secs: u64,
    pub poll_interval_ms: u64,
    pub result_reveal_delay_ms: u64,
    pub panel_reveal_delay_ms: u64,
    pub default_blocked_keywords: Vec<String>,
    pub messages: Messages,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: 30,
            poll_interval_ms: 1500,
            result_reveal_delay_ms: 500,
            panel_reveal_delay_ms: 50,
            default_blocked_keywords: DEFAULT_BLOCKED_KEYWORDS
                .iter()
                .map(|word| word.to_string())
                .collect(),
            messages: Messages::default(),
        }
    }
}

impl ClientConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        debug!("Read configuration from {}", path.display());

        let config = Self::from_toml_str(&raw)?;
        info!("Loaded configuration for backend {}", config.server_url);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server_url()?;

        for (field, value) in [
            ("request_timeout_secs", self.request_timeout_secs),
            ("poll_interval_ms", self.poll_interval_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.to_string(),
                });
            }
        }

        if self.messages.poll_failed.trim().is_empty()
            || self.messages.launch_failed.trim().is_empty()
        {
            return Err(ConfigError::ValidationFailed {
                reason: "failure messages must not be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn server_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.server_url).map_err(|_| ConfigError::InvalidValue {
            field: "server_url".to_string(),
            value: self.server_url.clone(),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn result_reveal_delay(&self) -> Duration {
        Duration::from_millis(self.result_reveal_delay_ms)
    }

    pub fn panel_reveal_delay(&self) -> Duration {
        Duration::from_millis(self.panel_reveal_delay_ms)
    }
}
