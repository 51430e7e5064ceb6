mod helpers;
mod middleware;
mod token;

pub use middleware::RequireAdmin;
pub use token::{TokenGenerator, issue_admin_token, parse_token};
