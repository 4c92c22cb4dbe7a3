//! HTTP 接口：中间件与路由处理

pub mod middleware;
pub mod services;
