pub mod authentication;
pub mod authorization;
