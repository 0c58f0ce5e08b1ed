//! bank_services Library
//!
//! Account, anti-fraud, authorization, history and public-info CRUD
//! services. Re-exports modules for the binary and integration tests.

pub mod crud;

pub mod account;
pub mod anti_fraud;
pub mod api;
pub mod audit;
pub mod authorization;
pub mod history;
pub mod public_info;

pub mod config;
pub mod db;
pub mod error;

pub use config::{Config, ServiceKind};
pub use error::{AppError, AppResult};
