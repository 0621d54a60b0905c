// Declare modules within the adapters directory
pub mod sqlite_store;
pub mod sqlite_users;
