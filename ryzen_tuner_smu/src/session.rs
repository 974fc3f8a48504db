//! 会话句柄的生命周期管理
//!
//! `Session`拥有唯一的底层硬件控制上下文。打开必须发生在任何
//! 其他操作之前且只发生一次；初始化返回空句柄是致命错误。
//! 会话持有原始指针，因而不是`Send`/`Sync`——所有调用都经过
//! `&mut self`串行化，符合底层库不可重入的约定。

use std::ffi::c_void;
use std::slice;

use crate::error::{AdjustError, RejectReason, SmuError, SmuResult};
use crate::params::AdjustRequest;
use crate::raw::{LibrarySpec, RyzenAdjApi};
use crate::table::{element_count, TableView, ENTRY_BYTES};

/// Ryzen硬件家族
///
/// 由`get_cpu_family`的原始值映射，仅用于启动日志；
/// 未识别的值归为`Unknown`，不影响任何功能。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RyzenFamily {
    Unknown,
    Raven,
    Picasso,
    Renoir,
    Cezanne,
    Dali,
    Lucienne,
    VanGogh,
    Rembrandt,
    Mendocino,
    Phoenix,
}

impl RyzenFamily {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => RyzenFamily::Raven,
            1 => RyzenFamily::Picasso,
            2 => RyzenFamily::Renoir,
            3 => RyzenFamily::Cezanne,
            4 => RyzenFamily::Dali,
            5 => RyzenFamily::Lucienne,
            6 => RyzenFamily::VanGogh,
            7 => RyzenFamily::Rembrandt,
            8 => RyzenFamily::Mendocino,
            9 => RyzenFamily::Phoenix,
            _ => RyzenFamily::Unknown,
        }
    }
}

/// 到硬件控制子系统的打开连接
pub struct Session {
    api: RyzenAdjApi,
    handle: *mut c_void,
    family: RyzenFamily,
    bios_if_ver: i32,
    table_version: u32,
    table_byte_size: usize,
    elements: usize,
    refresh_generation: u64,
}

impl Session {
    /// 打开会话
    ///
    /// 加载原生库、初始化硬件访问、缓存表的版本和大小
    /// （两者在会话存活期内不变）。失败不可重试：权限不足、
    /// 驱动缺失或硬件不支持都不是瞬态条件。
    pub fn open(spec: &LibrarySpec) -> SmuResult<Self> {
        let api = RyzenAdjApi::load(spec)?;

        let handle = unsafe { (api.init)() };
        if handle.is_null() {
            return Err(SmuError::InitFailed);
        }

        let family = RyzenFamily::from_raw(unsafe { (api.get_cpu_family)(handle) });
        let bios_if_ver = unsafe { (api.get_bios_if_ver)(handle) };
        let table_version = unsafe { (api.get_table_ver)(handle) };
        let table_byte_size = unsafe { (api.get_table_size)(handle) };
        let elements = element_count(table_byte_size);

        if table_byte_size % ENTRY_BYTES != 0 {
            tracing::warn!(
                target: "smu",
                "Table size {} is not a multiple of {}, trailing bytes ignored",
                table_byte_size,
                ENTRY_BYTES
            );
        }

        tracing::info!(
            target: "smu",
            "Session opened: family={:?}, bios_if_ver={}, table version {:x}, {} entries",
            family,
            bios_if_ver,
            table_version,
            elements
        );

        Ok(Self {
            api,
            handle,
            family,
            bios_if_ver,
            table_version,
            table_byte_size,
            elements,
            refresh_generation: 0,
        })
    }

    pub fn family(&self) -> RyzenFamily {
        self.family
    }

    pub fn bios_interface_version(&self) -> i32 {
        self.bios_if_ver
    }

    /// 表格式的版本标签，会话存活期内恒定
    pub fn table_version(&self) -> u32 {
        self.table_version
    }

    /// 表的字节大小，会话存活期内恒定
    pub fn table_byte_size(&self) -> usize {
        self.table_byte_size
    }

    /// 表项数量（字节大小 / 4）
    pub fn element_count(&self) -> usize {
        self.elements
    }

    /// 原地刷新并返回借用视图
    ///
    /// 视图的存储由会话内部持有，到下一次刷新为止有效。
    /// 返回值借用`&mut self`，保留视图会阻止后续刷新，
    /// 因此视图必须在本轮迭代内消费完毕。
    pub fn refresh_in_place(&mut self) -> SmuResult<TableView<'_>> {
        let code = unsafe { (self.api.refresh_table)(self.handle) };
        if code != 0 {
            return Err(SmuError::RefreshFailed(code));
        }
        self.refresh_generation += 1;

        let ptr = unsafe { (self.api.get_table_values)(self.handle) };
        if ptr.is_null() {
            return Err(SmuError::TableUnavailable);
        }
        let values = unsafe { slice::from_raw_parts(ptr, self.elements) };
        Ok(TableView::new(values, self.refresh_generation))
    }

    /// 刷新到调用方自有的缓冲区
    ///
    /// 缓冲区长度必须等于`element_count()`；其存储独立于
    /// 会话内部缓冲，跨刷新保留是安全的。
    pub fn refresh_into(&mut self, buf: &mut [f32]) -> SmuResult<()> {
        if buf.len() != self.elements {
            return Err(SmuError::BufferSize {
                expected: self.elements,
                actual: buf.len(),
            });
        }
        self.refresh_generation += 1;

        let code =
            unsafe { (self.api.get_new_table)(self.handle, buf.as_mut_ptr(), self.table_byte_size) };
        if code != 0 {
            return Err(SmuError::RefreshFailed(code));
        }
        Ok(())
    }

    /// 当前短时功率限制（瓦），独立于原始表的专用访问器
    pub fn fast_limit(&mut self) -> f32 {
        unsafe { (self.api.get_fast_limit)(self.handle) }
    }

    /// 执行一条调整命令
    ///
    /// 零返回码表示成功；非零映射为封闭的拒绝原因集合。
    /// 拒绝是命令级的，由调用方本地恢复。
    pub fn apply(&mut self, request: AdjustRequest) -> Result<(), AdjustError> {
        let code = match request {
            AdjustRequest::Set(param, value) => unsafe {
                (self.api.valued_setter(param))(self.handle, value)
            },
            AdjustRequest::Enable(flag) => unsafe { (self.api.flag_setter(flag))(self.handle) },
        };

        if code == 0 {
            Ok(())
        } else {
            Err(AdjustError {
                symbol: request.symbol(),
                reason: RejectReason::from_code(code),
            })
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        unsafe { (self.api.cleanup)(self.handle) };
        tracing::debug!(target: "smu", "Session released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_from_raw() {
        assert_eq!(RyzenFamily::from_raw(0), RyzenFamily::Raven);
        assert_eq!(RyzenFamily::from_raw(2), RyzenFamily::Renoir);
        assert_eq!(RyzenFamily::from_raw(9), RyzenFamily::Phoenix);
        assert_eq!(RyzenFamily::from_raw(-1), RyzenFamily::Unknown);
        assert_eq!(RyzenFamily::from_raw(99), RyzenFamily::Unknown);
    }
}
