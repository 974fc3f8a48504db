//! 客户端主入口
//!
//! 定义Client结构和启动序列：配置 → 日志 → 平台先决条件 →
//! 打开会话 → 按模式进入轮询循环。会话初始化失败是致命的，
//! 错误上抛到`main`以非零状态退出；循环内的刷新失败和命令
//! 拒绝都是非致命的，记录后继续。

use std::io;

use crate::adjust::Readjuster;
use crate::config::{ClientConfig, LoggingConfig, Mode};
use crate::core::error::ClientResult;
use crate::core::CancelToken;
use crate::monitor::TableMonitor;
use crate::platform::driver;
use ryzen_tuner_smu::Session;

/// 客户端主结构
///
/// # 示例
///
/// ```no_run
/// use ryzen_tuner::core::Client;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     Client::run()?;
///     Ok(())
/// }
/// ```
pub struct Client;

impl Client {
    /// 启动客户端并运行到进程被中断
    pub fn run() -> ClientResult<()> {
        let mut config = ClientConfig::load_or_default();
        config.apply_env_overrides();
        Self::initialize_logging(&config.logging);
        config.validate()?;

        tracing::info!(target: "client", "Client starting in {:?} mode", config.mode);

        driver::ensure_prerequisites(&config.library)?;

        let session = Session::open(&config.library)?;

        let cancel = CancelToken::new();
        match config.mode {
            Mode::Monitor => {
                let mut out = io::stdout().lock();
                TableMonitor::new(session, &config.monitor).run(&cancel, &mut out)?;
            }
            Mode::Readjust => {
                Readjuster::new(session, &config.adjust).run(&cancel);
            }
        }

        tracing::info!(target: "client", "Client shutting down");
        Ok(())
    }

    /// 初始化日志系统
    ///
    /// 配置tracing日志框架。`RUST_LOG`环境变量优先，未设置时
    /// 退回配置文件中的级别。输出到stderr，避免与stdout上的
    /// 表渲染交错。
    fn initialize_logging(config: &LoggingConfig) {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.level.as_filter()));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init();
    }
}
