mod admin;
mod anonymous;
mod page;

pub use admin::Admin;
pub use anonymous::Card;
pub use page::Page;
