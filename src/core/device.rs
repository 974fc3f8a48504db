//! 设备抽象
//!
//! 轮询循环与硬件访问之间的接缝：`Session`是唯一的生产实现，
//! 测试用脚本化的假设备替换，以便在无硬件环境下验证循环行为。

use ryzen_tuner_smu::{AdjustError, AdjustRequest, Session, SmuResult, TableView};

/// 对SMU控制子系统的最小操作集
///
/// 所有方法按`&mut self`串行化——会话不可重入，本规格假定
/// 单消费者（见`Session`的线程约束）。
pub trait SmuDevice {
    /// 表格式版本标签，会话期内恒定
    fn table_version(&self) -> u32;

    /// 表字节大小，会话期内恒定
    fn table_byte_size(&self) -> usize;

    /// 表项数量
    fn element_count(&self) -> usize {
        ryzen_tuner_smu::element_count(self.table_byte_size())
    }

    /// 原地刷新，返回到下一次刷新为止有效的借用视图
    fn refresh_in_place(&mut self) -> SmuResult<TableView<'_>>;

    /// 刷新到调用方缓冲区（长度必须等于`element_count()`）
    fn refresh_into(&mut self, buf: &mut [f32]) -> SmuResult<()>;

    /// 当前短时功率限制（瓦）
    fn fast_limit(&mut self) -> f32;

    /// 执行一条调整命令
    fn apply(&mut self, request: AdjustRequest) -> Result<(), AdjustError>;
}

impl SmuDevice for Session {
    fn table_version(&self) -> u32 {
        Session::table_version(self)
    }

    fn table_byte_size(&self) -> usize {
        Session::table_byte_size(self)
    }

    fn element_count(&self) -> usize {
        Session::element_count(self)
    }

    fn refresh_in_place(&mut self) -> SmuResult<TableView<'_>> {
        Session::refresh_in_place(self)
    }

    fn refresh_into(&mut self, buf: &mut [f32]) -> SmuResult<()> {
        Session::refresh_into(self, buf)
    }

    fn fast_limit(&mut self) -> f32 {
        Session::fast_limit(self)
    }

    fn apply(&mut self, request: AdjustRequest) -> Result<(), AdjustError> {
        Session::apply(self, request)
    }
}
