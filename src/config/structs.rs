use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// 默认配置文件路径（不存在时忽略）
pub const DEFAULT_CONFIG_PATH: &str = "clicklink.toml";

/// 环境变量前缀，分隔符为 `__`，例如 `CL__APP__CODE_LENGTH=10`
pub const ENV_PREFIX: &str = "CL";

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub app: LinkConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > 配置文件 > 默认值。
    /// 加载失败时打印原因并回退到默认值。
    pub fn load(path: Option<&str>) -> Self {
        let env = Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true);

        match Self::load_from_sources(path, env) {
            Ok(config) => config,
            Err(e) => {
                // 日志系统尚未初始化，只能直接输出
                eprintln!("[WARN] {}; using default configuration", e);
                Self::default()
            }
        }
    }

    /// Build the configuration from an explicit file path and environment source
    ///
    /// Without a path the default file is optional; an explicit path must exist.
    pub fn load_from_sources(path: Option<&str>, env: Environment) -> Result<Self> {
        let file = match path {
            Some(p) => File::with_name(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_PATH).required(false),
        };

        let config = Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize::<AppConfig>()?;
        Ok(config)
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> Result<String> {
        Ok(toml::to_string_pretty(&Self::default())?)
    }
}

/// 短链接行为配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
    #[serde(default = "default_cleanup_interval_seconds")]
    pub cleanup_interval_seconds: u64,
    #[serde(default = "default_code_length")]
    pub code_length: usize,
    #[serde(default = "default_open_browser")]
    pub open_browser: bool,
}

impl LinkConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    /// Sweep interval, never shorter than one second
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_seconds.max(1))
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            ttl_seconds: default_ttl_seconds(),
            cleanup_interval_seconds: default_cleanup_interval_seconds(),
            code_length: default_code_length(),
            open_browser: default_open_browser(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

fn default_base_url() -> String {
    "MyLink".to_string()
}

fn default_ttl_seconds() -> u64 {
    86400
}

fn default_cleanup_interval_seconds() -> u64 {
    30
}

fn default_code_length() -> usize {
    8
}

fn default_open_browser() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}
