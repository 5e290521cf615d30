//! `conflog-agent` library crate.
//!
//! The page-side half of the error logger: capture listeners, noise filter,
//! dedup queue, and the paced delivery pump. The binary entrypoint lives in
//! `main.rs`.

pub mod bootstrap;
pub mod capture;
pub mod config;
pub mod error;
pub mod filter;
pub mod pump;
pub mod queue;
pub mod transport;
