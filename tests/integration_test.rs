//! 端到端循环行为测试
//!
//! 用脚本化的假设备替换硬件会话，验证监控和校正循环的可观测行为。

use std::collections::HashMap;

use ryzen_tuner::adjust::{LoopState, Readjuster};
use ryzen_tuner::config::{AdjustConfig, MonitorConfig, TableSource};
use ryzen_tuner::core::SmuDevice;
use ryzen_tuner::monitor::TableMonitor;
use ryzen_tuner_smu::{
    AdjustError, AdjustRequest, FlagParameter, Parameter, RejectReason, SmuError, SmuResult,
    TableView,
};

/// 脚本化的假设备
struct FakeDevice {
    values: Vec<f32>,
    fast_limit: f32,
    /// 符号名到拒绝码的映射，未列出的命令成功
    rejections: HashMap<&'static str, i32>,
    /// 实际下发的命令记录（符号名，数值）
    issued: Vec<(&'static str, Option<u32>)>,
    generation: u64,
    fail_refresh: bool,
}

impl FakeDevice {
    fn new(values: Vec<f32>, fast_limit: f32) -> Self {
        Self {
            values,
            fast_limit,
            rejections: HashMap::new(),
            issued: Vec::new(),
            generation: 0,
            fail_refresh: false,
        }
    }
}

impl SmuDevice for FakeDevice {
    fn table_version(&self) -> u32 {
        0x0040_0005
    }

    fn table_byte_size(&self) -> usize {
        self.values.len() * 4
    }

    fn refresh_in_place(&mut self) -> SmuResult<TableView<'_>> {
        if self.fail_refresh {
            return Err(SmuError::RefreshFailed(-2));
        }
        self.generation += 1;
        Ok(TableView::new(&self.values, self.generation))
    }

    fn refresh_into(&mut self, buf: &mut [f32]) -> SmuResult<()> {
        if self.fail_refresh {
            return Err(SmuError::RefreshFailed(-2));
        }
        if buf.len() != self.values.len() {
            return Err(SmuError::BufferSize {
                expected: self.values.len(),
                actual: buf.len(),
            });
        }
        buf.copy_from_slice(&self.values);
        self.generation += 1;
        Ok(())
    }

    fn fast_limit(&mut self) -> f32 {
        self.fast_limit
    }

    fn apply(&mut self, request: AdjustRequest) -> Result<(), AdjustError> {
        let (symbol, value) = match request {
            AdjustRequest::Set(param, value) => (param.symbol(), Some(value)),
            AdjustRequest::Enable(flag) => (flag.symbol(), None),
        };
        self.issued.push((symbol, value));
        match self.rejections.get(symbol) {
            Some(&code) => Err(AdjustError {
                symbol,
                reason: RejectReason::from_code(code),
            }),
            None => Ok(()),
        }
    }
}

#[test]
fn test_correction_scenario_at_40w() {
    // 快速限制40W，目标35 → 校正：6条调整 + 1个开关，顺序固定
    let device = FakeDevice::new(vec![0.0; 10], 40.0);
    let mut readjuster = Readjuster::new(device, &AdjustConfig::default());
    assert_eq!(readjuster.state(), LoopState::Monitoring);

    let report = readjuster.tick().expect("deviation must trigger correction");
    assert_eq!(report.attempted, 7);
    assert_eq!(report.failed, 0);
    // 批次结束后无条件回到监控状态
    assert_eq!(readjuster.state(), LoopState::Monitoring);

    let expected: Vec<(&str, Option<u32>)> = vec![
        ("set_fast_limit", Some(35000)),
        ("set_slow_limit", Some(22000)),
        ("set_slow_time", Some(30)),
        ("set_tctl_temp", Some(97)),
        ("set_apu_skin_temp_limit", Some(50)),
        ("set_vrmmax_current", Some(100000)),
        ("set_max_performance", None),
    ];
    assert_eq!(readjuster.device().issued, expected);
}

#[test]
fn test_on_target_issues_nothing() {
    let device = FakeDevice::new(vec![0.0; 10], 35.0);
    let mut readjuster = Readjuster::new(device, &AdjustConfig::default());

    assert!(readjuster.tick().is_none());
    assert_eq!(readjuster.state(), LoopState::Monitoring);
    assert!(readjuster.device().issued.is_empty());
}

#[test]
fn test_rounding_before_comparison() {
    // 35.4 → round → 35 == 目标，不校正
    let device = FakeDevice::new(vec![0.0; 10], 35.4);
    let mut readjuster = Readjuster::new(device, &AdjustConfig::default());
    assert!(readjuster.tick().is_none());

    // 35.6 → round → 36 ≠ 目标，校正
    let device = FakeDevice::new(vec![0.0; 10], 35.6);
    let mut readjuster = Readjuster::new(device, &AdjustConfig::default());
    assert!(readjuster.tick().is_some());
}

#[test]
fn test_batch_is_not_short_circuited() {
    // 第一条命令被拒绝，其余全部照常执行
    let mut device = FakeDevice::new(vec![0.0; 10], 40.0);
    device.rejections.insert("set_fast_limit", -4);
    let mut readjuster = Readjuster::new(device, &AdjustConfig::default());

    let report = readjuster.tick().unwrap();
    assert_eq!(report.attempted, 7);
    assert_eq!(report.failed, 1);
    assert_eq!(readjuster.device().issued.len(), 7);
    assert_eq!(readjuster.state(), LoopState::Monitoring);
}

#[test]
fn test_multiple_rejections_all_attempted() {
    let mut device = FakeDevice::new(vec![0.0; 10], 40.0);
    device.rejections.insert("set_slow_limit", -1);
    device.rejections.insert("set_tctl_temp", -3);
    device.rejections.insert("set_max_performance", -4);
    let mut readjuster = Readjuster::new(device, &AdjustConfig::default());

    let report = readjuster.tick().unwrap();
    assert_eq!(report.attempted, 7);
    assert_eq!(report.failed, 3);
}

#[test]
fn test_successful_adjust_is_idempotent() {
    // 同一命令重复两次都成功——设置不是开关切换
    let mut device = FakeDevice::new(vec![0.0; 10], 40.0);
    let request = AdjustRequest::Set(Parameter::FastLimit, 35000);
    assert!(device.apply(request).is_ok());
    assert!(device.apply(request).is_ok());
    assert_eq!(device.issued.len(), 2);
}

#[test]
fn test_refresh_failure_does_not_stop_correction() {
    // 刷新失败沿用旧值继续判断
    let mut device = FakeDevice::new(vec![0.0; 10], 40.0);
    device.fail_refresh = true;
    let mut readjuster = Readjuster::new(device, &AdjustConfig::default());

    let report = readjuster.tick().unwrap();
    assert_eq!(report.attempted, 7);
}

#[test]
fn test_enable_flag_request() {
    let mut device = FakeDevice::new(vec![], 0.0);
    let request = AdjustRequest::Enable(FlagParameter::PowerSaving);
    assert!(device.apply(request).is_ok());
    assert_eq!(device.issued, vec![("set_power_saving", None)]);
}

#[test]
fn test_monitor_pmtable_full_render() -> anyhow::Result<()> {
    // 400字节表 → 100项；宽度160 → 每行10项 → 10行
    let values: Vec<f32> = (0..100).map(|i| i as f32).collect();
    let device = FakeDevice::new(values, 0.0);
    assert_eq!(device.table_byte_size(), 400);
    assert_eq!(device.element_count(), 100);

    let config = MonitorConfig {
        interval_secs: 1,
        source: TableSource::Pmtable,
    };
    let mut monitor = TableMonitor::new(device, &config);
    let mut out = Vec::new();

    let stats = monitor
        .tick_with_size(160, 100, &mut out)?
        .expect("refresh must succeed");
    assert_eq!(stats.rendered, 100);
    assert_eq!(stats.rows, 10);
    assert_eq!(stats.remaining, 0);

    let text = String::from_utf8(out)?;
    assert!(text.contains("  0:    0.00\t"));
    assert!(text.contains(" 99:   99.00\t"));
    Ok(())
}

#[test]
fn test_monitor_ptable_copy_mode() {
    let values: Vec<f32> = (0..20).map(|i| i as f32 * 0.5).collect();
    let device = FakeDevice::new(values, 0.0);
    let config = MonitorConfig {
        interval_secs: 1,
        source: TableSource::Ptable,
    };
    let mut monitor = TableMonitor::new(device, &config);
    let mut out = Vec::new();

    let stats = monitor.tick_with_size(80, 24, &mut out).unwrap().unwrap();
    assert_eq!(stats.rendered, 20);

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("  1:    0.50\t"));
}

#[test]
fn test_monitor_truncation_reports_remaining() {
    let values: Vec<f32> = (0..100).map(|i| i as f32).collect();
    let device = FakeDevice::new(values, 0.0);
    let config = MonitorConfig {
        interval_secs: 1,
        source: TableSource::Pmtable,
    };
    let mut monitor = TableMonitor::new(device, &config);
    let mut out = Vec::new();

    let stats = monitor.tick_with_size(160, 5, &mut out).unwrap().unwrap();
    assert_eq!(stats.rendered, 40);
    assert_eq!(stats.remaining, 60);
    assert!(String::from_utf8(out).unwrap().ends_with("60 More entries ..."));
}

#[test]
fn test_monitor_empty_table_keeps_polling() {
    // 零项的表不报错，循环照常休眠重试
    let device = FakeDevice::new(vec![], 0.0);
    let config = MonitorConfig {
        interval_secs: 1,
        source: TableSource::Pmtable,
    };
    let mut monitor = TableMonitor::new(device, &config);
    let mut out = Vec::new();

    let stats = monitor.tick_with_size(80, 24, &mut out).unwrap().unwrap();
    assert_eq!(stats.rendered, 0);
    assert_eq!(stats.remaining, 0);
}

#[test]
fn test_monitor_refresh_failure_is_recoverable() {
    let mut device = FakeDevice::new(vec![0.0; 4], 0.0);
    device.fail_refresh = true;
    let config = MonitorConfig {
        interval_secs: 1,
        source: TableSource::Pmtable,
    };
    let mut monitor = TableMonitor::new(device, &config);
    let mut out = Vec::new();

    // 刷新失败不是错误，返回None后下一轮重试
    assert!(monitor.tick_with_size(80, 24, &mut out).unwrap().is_none());
}
