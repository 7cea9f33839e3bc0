use actix_web::{App, HttpServer, middleware, web};

use meetings::auth::{rate_limit::RateLimiter, session::session_middleware};
use meetings::config::Config;
use meetings::{db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(std::io::Error::other)?;

    db::ensure_data_dir(&config.database_url)?;
    let pool = db::init_pool(&config.database_url, config.max_connections)
        .await
        .map_err(std::io::Error::other)?;
    db::run_migrations(&pool)
        .await
        .map_err(std::io::Error::other)?;

    let secret_key = config.session_key();
    let cookie_secure = config.cookie_secure;
    let limiter = RateLimiter::default();

    log::info!("Starting server at http://{}", config.listen_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(session_middleware(secret_key.clone(), cookie_secure))
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(limiter.clone()))
            .configure(handlers::configure)
            .default_service(web::to(|| async {
                actix_web::HttpResponse::NotFound().json(serde_json::json!({ "detail": "Not found." }))
            }))
    })
    .bind(&config.listen_addr)?
    .run()
    .await
}
