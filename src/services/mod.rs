//! Service layer for business logic
//!
//! HTTP handlers only parse requests and map results; validation,
//! code generation and audit logging live here.

pub mod activity_log;
pub mod code_generator;
mod file_service;
mod link_service;

pub use activity_log::ActivityLog;
pub use code_generator::{AttemptBudget, CodeGenerator, CodeLookup};
pub use file_service::*;
pub use link_service::*;
