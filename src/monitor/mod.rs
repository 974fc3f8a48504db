//! 电源管理表监控
//!
//! 固定节奏（默认1秒）的轮询循环：刷新表、探测终端尺寸、清屏、
//! 渲染快照、落盘、休眠。刷新失败记录后继续轮询——循环只因
//! 取消令牌（或外部中断）终止。

pub mod render;

use std::io::Write;
use std::thread;
use std::time::Duration;

use crate::config::{MonitorConfig, TableSource};
use crate::core::{CancelToken, ClientResult, SmuDevice};
use crate::platform::terminal;
use render::{render_snapshot, RenderStats};

/// 表轮询监控器
pub struct TableMonitor<D: SmuDevice> {
    device: D,
    source: TableSource,
    interval: Duration,
    /// ptable复制模式的调用方缓冲区，跨刷新保留
    buffer: Vec<f32>,
}

impl<D: SmuDevice> TableMonitor<D> {
    pub fn new(device: D, config: &MonitorConfig) -> Self {
        let buffer = vec![0.0; device.element_count()];
        Self {
            device,
            source: config.source,
            interval: Duration::from_secs(config.interval_secs),
            buffer,
        }
    }

    /// 轮询循环，直到令牌被取消
    pub fn run<W: Write>(&mut self, cancel: &CancelToken, out: &mut W) -> ClientResult<()> {
        tracing::info!(
            target: "monitor",
            "pmtable version: {:x}",
            self.device.table_version()
        );

        while !cancel.is_cancelled() {
            self.tick(out)?;
            thread::sleep(self.interval);
        }
        Ok(())
    }

    /// 单次迭代：刷新、清屏、渲染
    ///
    /// 刷新失败返回`None`并记录告警，下一轮重试；
    /// 空表正常返回零统计，循环照常休眠。
    pub fn tick<W: Write>(&mut self, out: &mut W) -> ClientResult<Option<RenderStats>> {
        let (columns, lines) = terminal::size();
        self.tick_with_size(columns, lines, out)
    }

    /// 以显式终端尺寸执行单次迭代（测试入口）
    pub fn tick_with_size<W: Write>(
        &mut self,
        columns: u16,
        lines: u16,
        out: &mut W,
    ) -> ClientResult<Option<RenderStats>> {
        let stats = match self.source {
            TableSource::Pmtable => match self.device.refresh_in_place() {
                Ok(view) => {
                    terminal::clear(out)?;
                    render_snapshot(view.values(), columns, lines, out)?
                }
                Err(e) => {
                    tracing::warn!(target: "monitor", "Table refresh failed: {}", e);
                    return Ok(None);
                }
            },
            TableSource::Ptable => {
                if let Err(e) = self.device.refresh_into(&mut self.buffer) {
                    tracing::warn!(target: "monitor", "Table refresh failed: {}", e);
                    return Ok(None);
                }
                terminal::clear(out)?;
                render_snapshot(&self.buffer, columns, lines, out)?
            }
        };

        out.flush()?;
        Ok(Some(stats))
    }
}
