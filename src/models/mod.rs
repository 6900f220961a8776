mod comment;
mod place;
mod product;
mod rating;
mod role;
mod session;
mod tag;
mod user;

pub use comment::*;
pub use place::*;
pub use product::*;
pub use rating::*;
pub use role::*;
pub use session::*;
pub use tag::*;
pub use user::*;
