use crate::configuration::Settings;
use crate::db;
use actix_web::{dev::ServiceRequest, web, HttpMessage};
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Authenticate with session cookie", skip(req))]
pub async fn try_cookie(req: &mut ServiceRequest) -> Result<bool, String> {
    let cookie_name = match req.app_data::<web::Data<Settings>>() {
        Some(settings) => settings.session.cookie_name.clone(),
        None => return Ok(false),
    };

    let token = match req.cookie(&cookie_name) {
        Some(cookie) if !cookie.value().is_empty() => cookie.value().to_string(),
        _ => return Ok(false),
    };

    let pg_pool = req
        .app_data::<web::Data<PgPool>>()
        .cloned()
        .ok_or_else(|| "database pool is not configured".to_string())?;

    let user = match db::session::fetch_user(pg_pool.get_ref(), &token).await? {
        Some(user) => user,
        None => {
            tracing::debug!("Session cookie is unknown or expired");
            return Ok(false);
        }
    };

    tracing::debug!(user_id = %user.id, role = %user.role, "Session resolved");
    if req.extensions_mut().insert(Arc::new(user)).is_some() {
        return Err("user already logged".to_string());
    }

    Ok(true)
}
