//! 运行时：启动准备、服务模式与优雅关闭

pub mod lifetime;
pub mod modes;
