use actix_web::dev::ServiceRequest;

pub fn anonym(req: &ServiceRequest) {
    tracing::debug!(path = %req.path(), "anonymous request");
}
