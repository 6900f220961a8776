//! Form actions under `/api`.

mod comment;
mod confirmation;
mod delete;
mod favorites;
mod feedback;
mod rating;
mod remove;

pub use comment::*;
pub use confirmation::*;
pub use delete::*;
pub use favorites::*;
pub use feedback::*;
pub use rating::*;
pub use remove::*;
