//! SMU访问层
//!
//! 通过原生共享库libryzenadj访问AMD Ryzen SoC的电源管理子系统。
//! 提供会话管理、电源管理表读取和SMU参数调整功能。
//!
//! ## 模块
//!
//! - [`raw`]: 原生库的符号绑定（libloading）
//! - [`session`]: 会话句柄的生命周期管理
//! - [`table`]: 电源管理表的视图和布局
//! - [`params`]: 封闭的参数枚举（静态分发）
//! - [`error`]: 错误类型定义

pub mod error;
pub mod params;
pub mod raw;
pub mod session;
pub mod table;

// Re-export public API
pub use error::{AdjustError, RejectReason, SmuError, SmuResult};
pub use params::{AdjustRequest, FlagParameter, Parameter};
pub use raw::LibrarySpec;
pub use session::{RyzenFamily, Session};
pub use table::{element_count, TableView, ENTRY_BYTES};
