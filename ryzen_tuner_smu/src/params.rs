//! SMU参数的封闭枚举
//!
//! 每个参数对应原生库中的一个`set_*`符号，在编译期静态映射，
//! 未知参数名在构造映射的位置（配置解析）被拒绝，而不是调用时。

use serde::{Deserialize, Serialize};

/// 带数值的可调整参数
///
/// 数值单位随参数而异：功率限制为毫瓦，时间为秒，温度为摄氏度，
/// 电流为毫安。数值语义由SMU固件解释，这里不做校验。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    /// 持续功率限制 (STAPM, mW)
    StapmLimit,
    /// 短时功率限制 (mW)
    FastLimit,
    /// 长时功率限制 (mW)
    SlowLimit,
    /// 长时限制时间常数 (s)
    SlowTime,
    /// STAPM时间常数 (s)
    StapmTime,
    /// 温度墙 (°C)
    TctlTemp,
    /// APU表面温度限制 (°C)
    ApuSkinTempLimit,
    /// VRM电流限制 (mA)
    VrmCurrent,
    /// VRM峰值电流限制 (mA)
    VrmMaxCurrent,
}

impl Parameter {
    /// 原生库中的setter符号名
    pub const fn symbol(self) -> &'static str {
        match self {
            Parameter::StapmLimit => "set_stapm_limit",
            Parameter::FastLimit => "set_fast_limit",
            Parameter::SlowLimit => "set_slow_limit",
            Parameter::SlowTime => "set_slow_time",
            Parameter::StapmTime => "set_stapm_time",
            Parameter::TctlTemp => "set_tctl_temp",
            Parameter::ApuSkinTempLimit => "set_apu_skin_temp_limit",
            Parameter::VrmCurrent => "set_vrm_current",
            Parameter::VrmMaxCurrent => "set_vrmmax_current",
        }
    }
}

/// 无数值的开关参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagParameter {
    /// 最大性能模式
    MaxPerformance,
    /// 省电模式
    PowerSaving,
}

impl FlagParameter {
    /// 原生库中的setter符号名
    pub const fn symbol(self) -> &'static str {
        match self {
            FlagParameter::MaxPerformance => "set_max_performance",
            FlagParameter::PowerSaving => "set_power_saving",
        }
    }
}

/// 一条调整命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustRequest {
    /// 设置带数值的参数
    Set(Parameter, u32),
    /// 启用开关参数
    Enable(FlagParameter),
}

impl AdjustRequest {
    /// 命令对应的原生符号名
    pub const fn symbol(&self) -> &'static str {
        match self {
            AdjustRequest::Set(param, _) => param.symbol(),
            AdjustRequest::Enable(flag) => flag.symbol(),
        }
    }
}
