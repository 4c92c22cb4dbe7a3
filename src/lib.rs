//! linkdrop - file drop and URL shortener service
//!
//! # Architecture
//! - `storage`: SeaORM persistence for links, files and activity records
//! - `services`: code generation, link service, file store, activity log
//! - `api`: actix-web handlers and middleware
//! - `config`: static configuration (TOML + environment)
//! - `runtime`: startup, server mode and shutdown
//! - `system`: logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
