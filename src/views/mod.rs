//! Serializable projections returned by loaders and actions.

pub mod comment;
pub mod place;
pub mod product;
pub mod rating;
pub mod user;
