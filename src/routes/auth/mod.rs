mod activate;
mod login;
mod logout;
mod register;

pub use activate::*;
pub use login::*;
pub use logout::*;
pub use register::*;

use crate::configuration::SessionSettings;
use crate::services::account::SignedIn;
use actix_web::cookie::{time, Cookie, SameSite};

pub(crate) fn session_cookie(settings: &SessionSettings, signed_in: &SignedIn) -> Cookie<'static> {
    Cookie::build(settings.cookie_name.clone(), signed_in.token.clone())
        .path("/")
        .http_only(true)
        .secure(settings.secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(settings.ttl_hours))
        .finish()
}

pub(crate) fn removal_cookie(settings: &SessionSettings) -> Cookie<'static> {
    let mut cookie = Cookie::build(settings.cookie_name.clone(), "")
        .path("/")
        .http_only(true)
        .finish();
    cookie.make_removal();
    cookie
}
