//! weathernow library
//!
//! Fetches weatherapi.com forecasts, normalizes them into current, hourly and
//! daily records, and keeps the last document on disk for offline display.

pub mod cache;
pub mod cli;
pub mod data;
pub mod refresh;
pub mod report;
