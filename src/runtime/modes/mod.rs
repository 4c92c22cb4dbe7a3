//! Mode routing
//!
//! 目前只有 HTTP 服务模式；配置生成等一次性命令在 `cli` 中直接处理。

pub mod server;

pub use server::run_server;
