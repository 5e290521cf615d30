//! Domain logic for the component conflict error logger.
//!
//! Everything here is free of I/O so it can be shared by the receiving API,
//! the persistence layer, and the page-side agent.

pub mod attribution;
pub mod error;
pub mod log;
pub mod nonce;
pub mod receipt;
pub mod roles;
pub mod sanitize;
pub mod summary;
pub mod types;
pub mod wire;
