use actix_web::http::header;
use actix_web::HttpResponse;

/// Only same-site absolute paths are honored, anything else falls back to `/`.
pub fn safe_redirect_target(redirect_to: Option<&str>) -> String {
    match redirect_to.map(str::trim) {
        Some(target)
            if target.starts_with('/')
                && !target.starts_with("//")
                && !target.contains('\\')
                && !target.chars().any(char::is_control) =>
        {
            target.to_string()
        }
        _ => "/".to_string(),
    }
}

pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
