// Request handlers, split into reads and writes
pub mod commands;
pub mod middleware;
pub mod query;
