pub mod comment;
pub mod favorite;
pub mod place;
pub mod product;
pub mod rating;
pub mod session;
pub mod tag;
pub mod user;
