//! Admin surface mounted under `/admin-v2`.

mod place;
mod product;
mod user;

pub use place::*;
pub use product::*;
pub use user::*;
