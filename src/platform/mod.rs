//! 平台协作者
//!
//! 终端尺寸/清屏和Windows驱动文件安装。这些是核心逻辑之外的
//! OS协作者，按平台条件编译。

pub mod driver;
pub mod terminal;

use thiserror::Error;

/// 平台层错误
#[derive(Error, Debug)]
pub enum PlatformError {
    /// 驱动文件安装失败
    #[error("Driver setup failed: {0}")]
    DriverSetup(String),
}

pub type PlatformResult<T> = Result<T, PlatformError>;
