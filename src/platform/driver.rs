//! 平台先决条件
//!
//! Windows下原生库依赖内核态辅助驱动`WinRing0x64.sys`，文件必须
//! 位于可执行文件旁。启动时一次性检查并安装（从库目录复制），
//! 幂等：已存在则跳过。其他平台无先决条件。
//!
//! 此步骤在会话构造之前、核心代码路径之外执行。

#[cfg(windows)]
use crate::platform::PlatformError;
use crate::platform::PlatformResult;
use ryzen_tuner_smu::LibrarySpec;

#[cfg(windows)]
const DRIVER_FILE: &str = "WinRing0x64.sys";

/// 确保平台先决条件满足
#[cfg(windows)]
pub fn ensure_prerequisites(library: &LibrarySpec) -> PlatformResult<()> {
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    let exe_dir = env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .ok_or_else(|| {
            PlatformError::DriverSetup("Cannot determine executable directory".to_string())
        })?;

    let target = exe_dir.join(DRIVER_FILE);
    if target.is_file() {
        tracing::debug!(target: "platform", "Driver already present at {:?}", target);
        return Ok(());
    }

    // 捆绑驱动与原生库同目录
    let source_dir = library
        .search_dir
        .clone()
        .or_else(|| {
            library
                .path
                .as_ref()
                .and_then(|p| p.parent().map(PathBuf::from))
        })
        .unwrap_or_else(|| PathBuf::from("."));
    let source = source_dir.join(DRIVER_FILE);

    if !source.is_file() {
        return Err(PlatformError::DriverSetup(format!(
            "Bundled driver not found at {:?}",
            source
        )));
    }

    fs::copy(&source, &target)
        .map_err(|e| PlatformError::DriverSetup(format!("Copy to {:?} failed: {}", target, e)))?;
    tracing::info!(target: "platform", "Installed driver to {:?}", target);
    Ok(())
}

/// 确保平台先决条件满足（非Windows平台无事可做）
#[cfg(not(windows))]
pub fn ensure_prerequisites(_library: &LibrarySpec) -> PlatformResult<()> {
    tracing::debug!(target: "platform", "No platform prerequisites on this OS");
    Ok(())
}
