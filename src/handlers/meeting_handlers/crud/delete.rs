use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::session::get_user_id;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::meeting;

/// DELETE /meetings/{id}/
pub async fn delete(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    if !meeting::delete(&pool, id).await? {
        return Err(AppError::NotFound);
    }

    log::info!("meeting {} deleted by user {}", id, get_user_id(&session).unwrap_or(0));
    Ok(HttpResponse::NoContent().finish())
}
