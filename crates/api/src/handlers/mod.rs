pub mod error_logs;
pub mod ingest;
pub mod page_context;
