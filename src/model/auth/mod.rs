pub mod token;
pub mod user;

pub use token::{AuthToken, AUTH_TOKEN_COOKIE};
pub use user::{Rights, User};
