//! SmartAttend - Schedule core for multi-tenant attendance management
//!
//! This crate provides the schedule derivations used by the faculty, admin
//! and student schedule screens, and the HTTP service that serves them.

pub mod api;
pub mod config;
pub mod db;
pub mod schedule;
pub mod services;

pub use config::Config;
pub use db::Database;
