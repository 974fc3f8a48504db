//! 原生libryzenadj的符号绑定
//!
//! 通过libloading加载共享库，在构造时一次性解析全部符号为
//! 原始函数指针。函数指针在`Library`存活期间有效，`RyzenAdjApi`
//! 持有库句柄保证这一点。

use std::ffi::c_void;
use std::path::PathBuf;

use libloading::{Library, Symbol};
use serde::{Deserialize, Serialize};

use crate::error::{SmuError, SmuResult};
use crate::params::{FlagParameter, Parameter};

/// 平台默认的库文件名
#[cfg(windows)]
pub const DEFAULT_LIBRARY: &str = "libryzenadj.dll";
#[cfg(not(windows))]
pub const DEFAULT_LIBRARY: &str = "libryzenadj.so";

/// 原生库的定位配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibrarySpec {
    /// 显式库路径，优先于搜索目录
    pub path: Option<PathBuf>,

    /// 搜索目录，与平台默认文件名拼接
    pub search_dir: Option<PathBuf>,
}

impl LibrarySpec {
    /// 解析最终加载路径
    pub fn resolved_path(&self) -> PathBuf {
        if let Some(path) = &self.path {
            return path.clone();
        }
        match &self.search_dir {
            Some(dir) => dir.join(DEFAULT_LIBRARY),
            None => PathBuf::from(DEFAULT_LIBRARY),
        }
    }
}

type InitFn = unsafe extern "C" fn() -> *mut c_void;
type CleanupFn = unsafe extern "C" fn(*mut c_void);
type CpuFamilyFn = unsafe extern "C" fn(*mut c_void) -> i32;
type BiosIfVerFn = unsafe extern "C" fn(*mut c_void) -> i32;
type TableVerFn = unsafe extern "C" fn(*mut c_void) -> u32;
type TableSizeFn = unsafe extern "C" fn(*mut c_void) -> usize;
type TableValuesFn = unsafe extern "C" fn(*mut c_void) -> *const f32;
type RefreshTableFn = unsafe extern "C" fn(*mut c_void) -> i32;
type NewTableFn = unsafe extern "C" fn(*mut c_void, *mut f32, usize) -> i32;
type FastLimitFn = unsafe extern "C" fn(*mut c_void) -> f32;
type ValuedSetterFn = unsafe extern "C" fn(*mut c_void, u32) -> i32;
type FlagSetterFn = unsafe extern "C" fn(*mut c_void) -> i32;

/// 解析好的原生API
///
/// 所有符号在`load`中解析完毕，之后的调用不再查找符号表。
pub struct RyzenAdjApi {
    pub(crate) init: InitFn,
    pub(crate) cleanup: CleanupFn,
    pub(crate) get_cpu_family: CpuFamilyFn,
    pub(crate) get_bios_if_ver: BiosIfVerFn,
    pub(crate) get_table_ver: TableVerFn,
    pub(crate) get_table_size: TableSizeFn,
    pub(crate) get_table_values: TableValuesFn,
    pub(crate) refresh_table: RefreshTableFn,
    pub(crate) get_new_table: NewTableFn,
    pub(crate) get_fast_limit: FastLimitFn,

    set_stapm_limit: ValuedSetterFn,
    set_fast_limit: ValuedSetterFn,
    set_slow_limit: ValuedSetterFn,
    set_slow_time: ValuedSetterFn,
    set_stapm_time: ValuedSetterFn,
    set_tctl_temp: ValuedSetterFn,
    set_apu_skin_temp_limit: ValuedSetterFn,
    set_vrm_current: ValuedSetterFn,
    set_vrmmax_current: ValuedSetterFn,

    set_max_performance: FlagSetterFn,
    set_power_saving: FlagSetterFn,

    // 库句柄必须比函数指针活得久
    _library: Library,
}

impl RyzenAdjApi {
    /// 加载共享库并解析全部符号
    pub fn load(spec: &LibrarySpec) -> SmuResult<Self> {
        let path = spec.resolved_path();
        let library = unsafe {
            Library::new(&path).map_err(|e| SmuError::LoadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?
        };

        tracing::debug!(target: "smu", "Loaded native library from {}", path.display());

        unsafe {
            Ok(Self {
                init: resolve(&library, "init_ryzenadj")?,
                cleanup: resolve(&library, "cleanup_ryzenadj")?,
                get_cpu_family: resolve(&library, "get_cpu_family")?,
                get_bios_if_ver: resolve(&library, "get_bios_if_ver")?,
                get_table_ver: resolve(&library, "get_table_ver")?,
                get_table_size: resolve(&library, "get_table_size")?,
                get_table_values: resolve(&library, "get_table_values")?,
                refresh_table: resolve(&library, "refresh_table")?,
                get_new_table: resolve(&library, "get_new_table")?,
                get_fast_limit: resolve(&library, "get_fast_limit")?,

                set_stapm_limit: resolve(&library, "set_stapm_limit")?,
                set_fast_limit: resolve(&library, "set_fast_limit")?,
                set_slow_limit: resolve(&library, "set_slow_limit")?,
                set_slow_time: resolve(&library, "set_slow_time")?,
                set_stapm_time: resolve(&library, "set_stapm_time")?,
                set_tctl_temp: resolve(&library, "set_tctl_temp")?,
                set_apu_skin_temp_limit: resolve(&library, "set_apu_skin_temp_limit")?,
                set_vrm_current: resolve(&library, "set_vrm_current")?,
                set_vrmmax_current: resolve(&library, "set_vrmmax_current")?,

                set_max_performance: resolve(&library, "set_max_performance")?,
                set_power_saving: resolve(&library, "set_power_saving")?,

                _library: library,
            })
        }
    }

    /// 带数值参数到setter的静态映射
    pub(crate) fn valued_setter(&self, param: Parameter) -> ValuedSetterFn {
        match param {
            Parameter::StapmLimit => self.set_stapm_limit,
            Parameter::FastLimit => self.set_fast_limit,
            Parameter::SlowLimit => self.set_slow_limit,
            Parameter::SlowTime => self.set_slow_time,
            Parameter::StapmTime => self.set_stapm_time,
            Parameter::TctlTemp => self.set_tctl_temp,
            Parameter::ApuSkinTempLimit => self.set_apu_skin_temp_limit,
            Parameter::VrmCurrent => self.set_vrm_current,
            Parameter::VrmMaxCurrent => self.set_vrmmax_current,
        }
    }

    /// 开关参数到setter的静态映射
    pub(crate) fn flag_setter(&self, flag: FlagParameter) -> FlagSetterFn {
        match flag {
            FlagParameter::MaxPerformance => self.set_max_performance,
            FlagParameter::PowerSaving => self.set_power_saving,
        }
    }
}

/// 解析单个符号为函数指针
unsafe fn resolve<T: Copy>(library: &Library, name: &'static str) -> SmuResult<T> {
    let symbol: Symbol<T> = library
        .get(name.as_bytes())
        .map_err(|e| SmuError::SymbolMissing {
            symbol: name,
            reason: e.to_string(),
        })?;
    Ok(*symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_resolved_path_default() {
        let spec = LibrarySpec::default();
        assert_eq!(spec.resolved_path(), Path::new(DEFAULT_LIBRARY));
    }

    #[test]
    fn test_resolved_path_explicit() {
        let spec = LibrarySpec {
            path: Some(PathBuf::from("/opt/ryzenadj/libryzenadj.so")),
            search_dir: Some(PathBuf::from("/ignored")),
        };
        assert_eq!(
            spec.resolved_path(),
            Path::new("/opt/ryzenadj/libryzenadj.so")
        );
    }

    #[test]
    fn test_resolved_path_search_dir() {
        let spec = LibrarySpec {
            path: None,
            search_dir: Some(PathBuf::from("/opt/ryzenadj")),
        };
        assert_eq!(
            spec.resolved_path(),
            PathBuf::from("/opt/ryzenadj").join(DEFAULT_LIBRARY)
        );
    }

    #[test]
    fn test_load_missing_library() {
        let spec = LibrarySpec {
            path: Some(PathBuf::from("/nonexistent/libryzenadj.so")),
            search_dir: None,
        };
        match RyzenAdjApi::load(&spec) {
            Err(SmuError::LoadFailed { path, .. }) => {
                assert!(path.contains("nonexistent"));
            }
            other => panic!("expected LoadFailed, got {:?}", other.err()),
        }
    }
}
