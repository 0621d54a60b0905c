pub mod change_password;
pub mod change_username;
pub mod inventory;
pub mod login;
pub mod register_user;

pub use change_password::handle_change_password_request;
pub use change_username::handle_change_username_request;
pub use inventory::{create_record, delete_record, update_record};
pub use login::{handle_login_request, handle_logout_request, handle_validate_token_request};
pub use register_user::handle_register_user_request;
