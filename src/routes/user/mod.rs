mod avatar;
mod profile;

pub use avatar::*;
pub use profile::*;
