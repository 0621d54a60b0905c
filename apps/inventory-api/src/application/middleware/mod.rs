pub mod auth;

pub use auth::{AuthenticatedUser, resolve_identity};
