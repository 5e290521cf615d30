//! Operator authentication.
//!
//! Operators present HS256 JWT access tokens issued by the host
//! application's login flow; this server only validates them.

pub mod jwt;
