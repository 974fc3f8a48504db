//! 统一配置系统
//!
//! 提供TOML/JSON配置文件、环境变量覆盖和启动时验证
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::impl_default;
use ryzen_tuner_smu::{FlagParameter, LibrarySpec, Parameter};

/// 客户端配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件读取错误
    #[error("Config file error: {0}")]
    FileError(#[from] std::io::Error),
    /// 解析错误
    #[error("Config parse error: {0}")]
    ParseError(String),
    /// 验证错误
    #[error("Config validation error: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// 运行模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// 轮询并渲染电源管理表
    Monitor,
    /// 监控快速限制并在偏离时重新应用限制批次
    Readjust,
}

/// 表刷新来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableSource {
    /// 原地刷新，读取会话内部缓冲的借用视图
    Pmtable,
    /// 复制刷新，写入调用方自有缓冲区
    Ptable,
}

/// 客户端主配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// 运行模式
    #[serde(default)]
    pub mode: Mode,

    /// 原生库定位
    #[serde(default)]
    pub library: LibrarySpec,

    /// 表监控配置
    #[serde(default)]
    pub monitor: MonitorConfig,

    /// 限制重调配置
    #[serde(default)]
    pub adjust: AdjustConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Monitor
    }
}

impl_default!(ClientConfig {
    mode: Mode::default(),
    library: LibrarySpec::default(),
    monitor: MonitorConfig::default(),
    adjust: AdjustConfig::default(),
    logging: LoggingConfig::default(),
});

/// 表监控配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// 轮询间隔（秒）
    pub interval_secs: u64,

    /// 刷新来源
    pub source: TableSource,
}

impl_default!(MonitorConfig {
    interval_secs: 1,
    source: TableSource::Pmtable,
});

/// 批次中的一条带数值调整
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ApplyEntry {
    /// 参数名（未知名称在解析时报错）
    pub param: Parameter,
    /// 目标值
    pub value: u32,
}

/// 限制重调配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustConfig {
    /// 轮询间隔（秒）
    pub interval_secs: u64,

    /// 快速限制目标值（瓦），偏离时触发校正
    pub target_fast_limit_w: i64,

    /// 校正批次，按顺序全部执行，单条失败不中断
    pub apply: Vec<ApplyEntry>,

    /// 批次之后启用的开关参数
    pub enable: Vec<FlagParameter>,
}

impl_default!(AdjustConfig {
    interval_secs: 3,
    target_fast_limit_w: 35,
    apply: vec![
        ApplyEntry { param: Parameter::FastLimit, value: 35000 },
        ApplyEntry { param: Parameter::SlowLimit, value: 22000 },
        ApplyEntry { param: Parameter::SlowTime, value: 30 },
        ApplyEntry { param: Parameter::TctlTemp, value: 97 },
        ApplyEntry { param: Parameter::ApuSkinTempLimit, value: 50 },
        ApplyEntry { param: Parameter::VrmMaxCurrent, value: 100000 },
    ],
    enable: vec![FlagParameter::MaxPerformance],
});

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: LogLevel,
}

impl_default!(LoggingConfig {
    level: LogLevel::Info,
});

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// 对应的EnvFilter指令
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl ClientConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 从TOML文件加载配置
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_toml_str(&content)
    }

    /// 从TOML字符串解析配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 从JSON文件加载配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_json_str(&content)
    }

    /// 从JSON字符串解析配置
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 保存为TOML文件
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 从环境变量覆盖配置
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("RYZEN_TUNER_MODE") {
            match val.as_str() {
                "monitor" => self.mode = Mode::Monitor,
                "readjust" => self.mode = Mode::Readjust,
                other => {
                    tracing::warn!(target: "config", "Ignoring unknown RYZEN_TUNER_MODE: {}", other)
                }
            }
        }
        if let Ok(val) = env::var("RYZEN_TUNER_LIBRARY") {
            self.library.path = Some(val.into());
        }
        if let Ok(val) = env::var("RYZEN_TUNER_MONITOR_INTERVAL_SECS") {
            if let Ok(secs) = val.parse() {
                self.monitor.interval_secs = secs;
            }
        }
        if let Ok(val) = env::var("RYZEN_TUNER_ADJUST_INTERVAL_SECS") {
            if let Ok(secs) = val.parse() {
                self.adjust.interval_secs = secs;
            }
        }
        if let Ok(val) = env::var("RYZEN_TUNER_TARGET_FAST_LIMIT_W") {
            if let Ok(target) = val.parse() {
                self.adjust.target_fast_limit_w = target;
            }
        }
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.monitor.interval_secs == 0 || self.monitor.interval_secs > 3600 {
            return Err(ConfigError::ValidationError(
                "Invalid monitor interval".to_string(),
            ));
        }
        if self.adjust.interval_secs == 0 || self.adjust.interval_secs > 3600 {
            return Err(ConfigError::ValidationError(
                "Invalid adjust interval".to_string(),
            ));
        }
        if self.adjust.target_fast_limit_w <= 0 || self.adjust.target_fast_limit_w > 1000 {
            return Err(ConfigError::ValidationError(
                "Invalid target fast limit".to_string(),
            ));
        }
        if self.mode == Mode::Readjust && self.adjust.apply.is_empty() {
            return Err(ConfigError::ValidationError(
                "Readjust mode requires a non-empty apply batch".to_string(),
            ));
        }
        Ok(())
    }

    /// 自动查找并加载配置文件
    ///
    /// 按以下顺序查找：
    /// 1. ./ryzen_tuner.toml
    /// 2. ./ryzen_tuner.json
    /// 3. <用户配置目录>/ryzen_tuner/config.toml
    /// 4. 使用默认配置
    pub fn load_or_default() -> Self {
        if let Ok(config) = Self::from_toml_file("ryzen_tuner.toml") {
            tracing::info!(target: "config", "Loaded config from ryzen_tuner.toml");
            return config;
        }

        if let Ok(config) = Self::from_json_file("ryzen_tuner.json") {
            tracing::info!(target: "config", "Loaded config from ryzen_tuner.json");
            return config;
        }

        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("ryzen_tuner").join("config.toml");
            if let Ok(config) = Self::from_toml_file(&config_path) {
                tracing::info!(target: "config", "Loaded config from {:?}", config_path);
                return config;
            }
        }

        tracing::info!(target: "config", "Using default configuration");
        Self::default()
    }
}
