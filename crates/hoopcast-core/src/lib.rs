// Shared infrastructure: configuration, response caching, and logging.

pub mod cache;
pub mod config;
pub mod logging;
