mod current_user;
mod manager;
mod manager_middleware;
mod method;

pub use current_user::CurrentUser;
pub use manager::*;
pub use manager_middleware::*;
