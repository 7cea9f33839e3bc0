pub mod auth_handlers;
pub mod meeting_handlers;

use actix_web::{HttpRequest, HttpResponse, error, middleware::from_fn, web};
use serde_json::json;

use crate::auth::middleware::{require_auth, require_json_content_type};
use crate::errors::AppError;

/// Mount point of the API inside the application.
pub const API_ROOT: &str = "/api";

/// GET /: links to the browsable collections.
pub async fn api_root(req: HttpRequest) -> HttpResponse {
    let info = req.connection_info();
    let meetings = format!("{}://{}{}/meetings/", info.scheme(), info.host(), API_ROOT);
    HttpResponse::Ok().json(json!({ "meetings": meetings }))
}

/// Extractor failures answer with JSON like every other error.
fn extractor_configs(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("JSON parse error - {err}")).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid query string - {err}")).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|_err, _req| {
        error::Error::from(AppError::NotFound)
    }));
}

/// Configure API routes under [`API_ROOT`].
///
/// Meeting routes and logout require a session; register and login are open.
/// On protected routes the session check runs before the content-type check.
pub fn configure(cfg: &mut web::ServiceConfig) {
    extractor_configs(cfg);
    cfg.service(
        web::scope(API_ROOT)
            .route("/", web::get().to(api_root))
            .service(
                web::resource("/register/")
                    .wrap(from_fn(require_json_content_type))
                    .route(web::post().to(auth_handlers::register)),
            )
            .service(
                web::resource("/login/")
                    .wrap(from_fn(require_json_content_type))
                    .route(web::post().to(auth_handlers::login)),
            )
            .service(
                web::resource("/logout/")
                    .wrap(from_fn(require_json_content_type))
                    .wrap(from_fn(require_auth))
                    .route(web::post().to(auth_handlers::logout)),
            )
            .service(
                web::scope("/meetings")
                    .wrap(from_fn(require_json_content_type))
                    .wrap(from_fn(require_auth))
                    .route("/", web::get().to(meeting_handlers::list))
                    .route("/", web::post().to(meeting_handlers::create))
                    .route("/{id}/", web::get().to(meeting_handlers::read))
                    .route("/{id}/", web::put().to(meeting_handlers::replace))
                    .route("/{id}/", web::patch().to(meeting_handlers::partial_update))
                    .route("/{id}/", web::delete().to(meeting_handlers::delete)),
            ),
    );
}
