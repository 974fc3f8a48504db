//! 限制监控与校正
//!
//! 固定节奏（默认3秒）的监控循环：刷新表、读取快速限制、与目标
//! 比较；偏离时进入校正状态，按顺序执行完整的调整批次——单条
//! 失败只记录诊断，既不中断批次也不中断循环——随后无条件回到
//! 监控状态，校正是否生效留给下一轮轮询判断。

use std::thread;
use std::time::Duration;

use crate::config::AdjustConfig;
use crate::core::{CancelToken, SmuDevice};
use ryzen_tuner_smu::AdjustRequest;

/// 循环状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// 观测指标符合目标
    Monitoring,
    /// 正在执行校正批次
    Correcting,
}

/// 一次校正批次的统计
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrectionReport {
    /// 执行的命令数（恒等于批次长度，不短路）
    pub attempted: usize,
    /// 被拒绝的命令数
    pub failed: usize,
}

/// 限制重调器
pub struct Readjuster<D: SmuDevice> {
    device: D,
    target: i64,
    requests: Vec<AdjustRequest>,
    interval: Duration,
    state: LoopState,
}

impl<D: SmuDevice> Readjuster<D> {
    /// 由配置构造：带数值条目在前，开关条目在后，顺序保持
    pub fn new(device: D, config: &AdjustConfig) -> Self {
        let mut requests = Vec::with_capacity(config.apply.len() + config.enable.len());
        requests.extend(
            config
                .apply
                .iter()
                .map(|entry| AdjustRequest::Set(entry.param, entry.value)),
        );
        requests.extend(config.enable.iter().copied().map(AdjustRequest::Enable));

        Self {
            device,
            target: config.target_fast_limit_w,
            requests,
            interval: Duration::from_secs(config.interval_secs),
            state: LoopState::Monitoring,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// 监控循环，直到令牌被取消
    pub fn run(&mut self, cancel: &CancelToken) {
        tracing::info!(
            target: "adjust",
            "Monitor if fast limit is not {}W",
            self.target
        );

        while !cancel.is_cancelled() {
            self.tick();
            thread::sleep(self.interval);
        }
    }

    /// 单次迭代：刷新、比较、必要时校正
    ///
    /// 返回本轮的校正统计；指标在目标上时返回`None`。
    pub fn tick(&mut self) -> Option<CorrectionReport> {
        // 刷新失败时沿用上一轮的值继续判断
        if let Err(e) = self.device.refresh_in_place() {
            tracing::warn!(target: "adjust", "Table refresh failed: {}", e);
        }

        let limit = self.device.fast_limit().round() as i64;
        if limit == self.target {
            self.state = LoopState::Monitoring;
            return None;
        }

        self.state = LoopState::Correcting;
        tracing::info!(
            target: "adjust",
            "reapply limits, because old limit was {}",
            limit
        );

        let report = self.correct();

        // 批次执行完毕即回到监控，不等待确认
        self.state = LoopState::Monitoring;
        Some(report)
    }

    /// 按顺序执行完整批次，每条命令独立，失败不短路
    fn correct(&mut self) -> CorrectionReport {
        let mut failed = 0;
        for request in &self.requests {
            if let Err(e) = self.device.apply(*request) {
                failed += 1;
                tracing::error!(target: "adjust", "{}", e);
            }
        }
        CorrectionReport {
            attempted: self.requests.len(),
            failed,
        }
    }
}
