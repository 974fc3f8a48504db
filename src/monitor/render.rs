//! 表快照渲染
//!
//! 将一次刷新得到的表项序列格式化为终端文本：
//!
//! - 每项16列宽：3位右对齐索引、冒号、8宽2位小数的数值、制表符
//! - 按终端宽度换行，每行条目数 = max(1, 列数 / 16)
//! - 行数超出终端高度减一时截断，改为输出剩余条目计数
//!
//! 全部为纯函数，布局性质直接可测。NaN/Inf按不透明遥测值原样
//! 渲染，不做任何校验。

use std::io::{self, Write};

/// 每个表项占用的终端列数
pub const ENTRY_WIDTH: usize = 16;

/// 一次快照渲染的统计
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    /// 实际渲染的条目数
    pub rendered: usize,
    /// 输出的逻辑行数（含末尾不完整行）
    pub rows: usize,
    /// 因截断未渲染的条目数
    pub remaining: usize,
}

/// 终端宽度对应的每行条目数
///
/// 宽度不足16列时取下限1，避免除零。
pub fn entries_per_row(columns: u16) -> usize {
    (columns as usize / ENTRY_WIDTH).max(1)
}

/// 渲染一次表快照
///
/// 行数达到`lines - 1`后停止，输出`{剩余} More entries ...`；
/// 剩余计数 = 总数 - 1 - 最后渲染的索引，恒为非负。
/// 空表不输出任何内容。
pub fn render_snapshot(
    values: &[f32],
    columns: u16,
    lines: u16,
    out: &mut impl Write,
) -> io::Result<RenderStats> {
    let per_row = entries_per_row(columns);
    let max_rows = (lines as usize).saturating_sub(1);

    let mut rendered = 0;
    let mut rows = 0;
    let mut remaining = 0;

    for (index, value) in values.iter().enumerate() {
        write!(out, "{:3}:{:8.2}\t", index, value)?;
        rendered += 1;

        if index % per_row == per_row - 1 {
            writeln!(out)?;
            rows += 1;
            if rows >= max_rows {
                remaining = values.len() - 1 - index;
                write!(out, "{} More entries ...", remaining)?;
                break;
            }
        }
    }

    // 末尾不完整行补换行
    if rendered > 0 && rendered % per_row != 0 {
        writeln!(out)?;
        rows += 1;
    }

    Ok(RenderStats {
        rendered,
        rows,
        remaining,
    })
}
