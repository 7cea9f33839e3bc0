use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde_json::{Map, Value};

use crate::auth::session::get_user_id;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::meeting;
use crate::serializers::meeting::validate_new;

/// POST /meetings/
pub async fn create(
    pool: web::Data<DbPool>,
    session: Session,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    let new = validate_new(&body)?;
    let created = meeting::create(&pool, &new).await?;

    log::info!(
        "meeting {} created by user {}",
        created.id,
        get_user_id(&session).unwrap_or(0)
    );
    Ok(HttpResponse::Created().json(created))
}
