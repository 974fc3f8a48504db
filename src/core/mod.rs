//! 客户端核心
//!
//! 生命周期入口、设备抽象、取消令牌和统一错误类型。

pub mod cancel;
pub mod client;
pub mod device;
pub mod error;
#[macro_use]
pub mod macros;

pub use cancel::CancelToken;
pub use client::Client;
pub use device::SmuDevice;
pub use error::{ClientError, ClientResult};
