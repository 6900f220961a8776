pub mod admin;
pub mod api;
pub mod auth;
pub mod health_checks;
pub mod place;
pub mod product;
pub mod storage;
pub mod user;

pub use health_checks::*;
