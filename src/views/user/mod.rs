mod admin;
mod profile;

pub use admin::Admin;
pub use profile::Profile;
