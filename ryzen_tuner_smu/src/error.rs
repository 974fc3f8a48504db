//! SMU访问层错误处理
//!
//! 区分两类错误：会话级错误（`SmuError`，初始化失败是致命的）
//! 和单条调整命令的拒绝（`AdjustError`，本地恢复，不中断循环）。

use thiserror::Error;

/// SMU会话错误
#[derive(Error, Debug)]
pub enum SmuError {
    /// 原生库加载失败
    #[error("Failed to load native library {path}: {reason}")]
    LoadFailed { path: String, reason: String },

    /// 原生库缺少符号
    #[error("Failed to resolve symbol {symbol}: {reason}")]
    SymbolMissing {
        symbol: &'static str,
        reason: String,
    },

    /// 初始化返回空句柄（权限不足、驱动缺失或硬件不支持）
    #[error("RyzenAdj could not get initialized")]
    InitFailed,

    /// 表刷新被底层拒绝
    #[error("Table refresh failed with code {0}")]
    RefreshFailed(i32),

    /// 表数据指针不可用
    #[error("Table values are not available")]
    TableUnavailable,

    /// 调用方缓冲区大小与表不匹配
    #[error("Table buffer holds {actual} entries, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

/// SMU结果类型别名
pub type SmuResult<T> = Result<T, SmuError>;

/// 调整命令的拒绝原因
///
/// 由原生setter的整数返回码映射而来，封闭集合：
/// `-1`/`-3`/`-4`有专门含义，其余非零码统一归为`Other`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// 此硬件家族不支持该参数
    UnsupportedFamily,
    /// 此SMU固件版本不支持该参数
    UnsupportedSmu,
    /// SMU当前拒绝该参数（值越界、状态冲突等）
    Rejected,
    /// 未识别的失败码
    Other(i32),
}

impl RejectReason {
    /// 从原生返回码映射（调用方保证非零）
    pub fn from_code(code: i32) -> Self {
        match code {
            -1 => RejectReason::UnsupportedFamily,
            -3 => RejectReason::UnsupportedSmu,
            -4 => RejectReason::Rejected,
            other => RejectReason::Other(other),
        }
    }

    /// 原生返回码
    pub fn code(&self) -> i32 {
        match self {
            RejectReason::UnsupportedFamily => -1,
            RejectReason::UnsupportedSmu => -3,
            RejectReason::Rejected => -4,
            RejectReason::Other(code) => *code,
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::UnsupportedFamily => write!(f, "is not supported on this family"),
            RejectReason::UnsupportedSmu => write!(f, "is not supported on this SMU"),
            RejectReason::Rejected => write!(f, "is rejected by SMU"),
            RejectReason::Other(code) => write!(f, "did fail with {}", code),
        }
    }
}

/// 单条调整命令的失败，携带原生符号名用于诊断输出
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{symbol} {reason}")]
pub struct AdjustError {
    /// 失败的原生setter符号名，如`set_fast_limit`
    pub symbol: &'static str,
    /// 拒绝原因
    pub reason: RejectReason,
}
