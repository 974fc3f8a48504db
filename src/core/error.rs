//! 统一错误处理模块
//!
//! 提供客户端范围内的统一错误类型定义。
//!
//! ## 错误分层
//!
//! - **致命错误**: 配置无效、会话初始化失败——进程以非零状态退出
//! - **命令级拒绝** (`ryzen_tuner_smu::AdjustError`): 记录到错误流后
//!   本地恢复，循环继续运行

use thiserror::Error;

use crate::config::ConfigError;
use crate::platform::PlatformError;
use ryzen_tuner_smu::SmuError;

/// 客户端核心错误类型
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("SMU error: {0}")]
    Smu(#[from] SmuError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 客户端结果类型别名
pub type ClientResult<T> = Result<T, ClientError>;
