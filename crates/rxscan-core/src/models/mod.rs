//! Data models for decoded scans, candidate records and match reports.

pub mod config;
pub mod record;
pub mod scan;
