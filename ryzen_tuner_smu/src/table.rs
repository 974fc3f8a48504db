//! 电源管理表的视图和布局
//!
//! 表是一段固定宽度的float32序列，格式由版本号标记、厂商定义，
//! 这里只按不透明遥测数据处理（包括NaN/Inf在内的任意位模式都有效）。

/// 每个表项的字节宽度（float32）
pub const ENTRY_BYTES: usize = 4;

/// 由表的字节大小推导表项数量
///
/// 有效的表大小总是4的整数倍，余数被截断（调用方负责告警）。
pub fn element_count(byte_size: usize) -> usize {
    byte_size / ENTRY_BYTES
}

/// 原地刷新模式下的借用视图
///
/// 视图的存储由会话持有，仅在下一次刷新或会话销毁前有效。
/// 生命周期绑定到会话的可变借用，因此无法跨刷新保留——
/// 过期读取在编译期即被拒绝。`generation`标记视图来自第几次刷新。
#[derive(Debug)]
pub struct TableView<'a> {
    values: &'a [f32],
    generation: u64,
}

impl<'a> TableView<'a> {
    pub fn new(values: &'a [f32], generation: u64) -> Self {
        Self { values, generation }
    }

    /// 表项切片
    pub fn values(&self) -> &'a [f32] {
        self.values
    }

    /// 视图对应的刷新代数
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 表项数量
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 按索引读取单个表项
    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_count_exact() {
        // 字节大小 / 4 == 表项数，无余数
        assert_eq!(element_count(400), 100);
        assert_eq!(element_count(0), 0);
        assert_eq!(element_count(4), 1);
        assert_eq!(element_count(2468), 617);
    }

    #[test]
    fn test_element_count_floors_remainder() {
        assert_eq!(element_count(401), 100);
        assert_eq!(element_count(3), 0);
    }

    #[test]
    fn test_view_accessors() {
        let values = [1.0_f32, 2.5, f32::NAN, f32::INFINITY];
        let view = TableView::new(&values, 7);

        assert_eq!(view.len(), 4);
        assert!(!view.is_empty());
        assert_eq!(view.generation(), 7);
        assert_eq!(view.get(1), Some(2.5));
        assert_eq!(view.get(4), None);
        // NaN/Inf是合法的遥测值，原样保留
        assert!(view.get(2).unwrap().is_nan());
        assert!(view.get(3).unwrap().is_infinite());
    }

    #[test]
    fn test_empty_view() {
        let view = TableView::new(&[], 1);
        assert!(view.is_empty());
        assert_eq!(view.len(), 0);
    }
}
