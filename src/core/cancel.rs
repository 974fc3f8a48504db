//! 循环取消令牌
//!
//! 轮询循环本身永不终止（只有外部中断能结束进程），但循环实现
//! 每轮迭代检查令牌，使测试可以注入有界的迭代次数，长驻进程的
//! 宿主也能组合确定性的停机。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 可克隆的取消标志
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// 请求取消，所有克隆共享同一标志
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
