use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde_json::{Map, Value};

use crate::auth::session::get_user_id;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::meeting;
use crate::serializers::meeting::{Mode, validate_changes};

/// PUT /meetings/{id}/: all required fields must be sent.
pub async fn replace(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    apply(&pool, &session, path.into_inner(), &body, Mode::Full).await
}

/// PATCH /meetings/{id}/: only the fields sent are changed.
pub async fn partial_update(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    apply(&pool, &session, path.into_inner(), &body, Mode::Partial).await
}

async fn apply(
    pool: &DbPool,
    session: &Session,
    id: i64,
    body: &Map<String, Value>,
    mode: Mode,
) -> Result<HttpResponse, AppError> {
    // unknown id is a 404 even when the body is also invalid
    meeting::find_by_id(pool, id).await?.ok_or(AppError::NotFound)?;

    let changes = validate_changes(body, mode)?;
    let updated = meeting::update(pool, id, &changes)
        .await?
        .ok_or(AppError::NotFound)?;

    log::info!(
        "meeting {} updated by user {}",
        id,
        get_user_id(session).unwrap_or(0)
    );
    Ok(HttpResponse::Ok().json(updated))
}
