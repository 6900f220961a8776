use crate::configuration::Settings;
use crate::connectors;
use crate::helpers::{FileStorage, JsonResponse};
use crate::middleware;
use crate::routes;
use actix_cors::Cors;
use actix_web::{dev::Server, web, App, HttpServer};
use sqlx::{Pool, Postgres};
use std::net::TcpListener;
use std::time::Duration;
use tracing_actix_web::TracingLogger;

pub async fn run(
    listener: TcpListener,
    pg_pool: Pool<Postgres>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;

    // outbound integrations
    let notifier = connectors::init_telegram(settings.telegram.as_ref(), http_client.clone());
    let mailer = connectors::init_mailer(&settings.mailer, http_client.clone());

    tracing::info!("File storage rooted at {}", settings.storage.root);
    let storage = web::Data::new(FileStorage::new(&settings.storage.root));

    let settings = web::Data::new(settings);
    let pg_pool = web::Data::new(pg_pool);
    let http_client = web::Data::new(http_client);

    let form_config = web::FormConfig::default()
        .error_handler(|err, _req| JsonResponse::<()>::build().bad_request(err.to_string()));
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| JsonResponse::<()>::build().bad_request(err.to_string()));
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| JsonResponse::<()>::build().bad_request(err.to_string()));
    let path_config = web::PathConfig::default()
        .error_handler(|err, _req| JsonResponse::<()>::build().not_found(err.to_string()));
    let payload_config = web::PayloadConfig::new(routes::user::AVATAR_MAX_BYTES);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::authentication::Manager::new())
            .wrap(Cors::permissive())
            .wrap(TracingLogger::default())
            .service(web::scope("/health_check").service(routes::health_check))
            .service(
                web::scope("/auth")
                    .service(routes::auth::register_handler)
                    .service(routes::auth::login_handler)
                    .service(routes::auth::logout_handler)
                    .service(routes::auth::activate_handler),
            )
            .service(
                web::scope("/api")
                    .service(routes::api::rate_product_handler)
                    .service(routes::api::rate_place_handler)
                    .service(routes::api::favorites_handler)
                    .service(routes::api::delete_place_handler)
                    .service(routes::api::delete_product_handler)
                    .service(routes::api::delete_user_handler)
                    .service(routes::api::del_rating_handler)
                    .service(routes::api::del_comment_handler)
                    .service(routes::api::add_comment_handler)
                    .service(routes::api::comment_media_handler)
                    .service(routes::api::send_feedback_handler)
                    .service(routes::api::send_confirmation_email_handler),
            )
            .service(
                web::scope("/admin-v2")
                    .service(routes::admin::admin_list_users_handler)
                    .service(routes::admin::admin_change_role_handler)
                    .service(routes::admin::admin_list_products_handler)
                    .service(routes::admin::admin_create_product_handler)
                    .service(routes::admin::admin_update_product_handler)
                    .service(routes::admin::admin_list_places_handler)
                    .service(routes::admin::admin_create_place_handler)
                    .service(routes::admin::admin_update_place_handler),
            )
            .service(
                web::scope("/user")
                    .service(routes::user::profile_handler)
                    .service(routes::user::avatar_handler),
            )
            .service(web::scope("/storage").service(routes::storage::file_handler))
            .service(routes::place::list_handler)
            .service(routes::place::item_handler)
            .service(routes::product::list_handler)
            .service(routes::product::category_handler)
            .service(routes::product::item_handler)
            .app_data(form_config.clone())
            .app_data(json_config.clone())
            .app_data(query_config.clone())
            .app_data(path_config.clone())
            .app_data(payload_config.clone())
            .app_data(pg_pool.clone())
            .app_data(http_client.clone())
            .app_data(storage.clone())
            .app_data(notifier.clone())
            .app_data(mailer.clone())
            .app_data(settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
