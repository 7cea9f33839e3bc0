use actix_web::{web, HttpResponse};

use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::meeting;
use crate::serializers::meeting::{ListParams, validate_filter};

/// GET /meetings/: all meetings, newest first.
///
/// Optional query params: `status`, `date_of_meeting`, `search`.
pub async fn list(
    pool: web::Data<DbPool>,
    query: web::Query<ListParams>,
) -> Result<HttpResponse, AppError> {
    let filter = validate_filter(&query)?;
    let meetings = meeting::find_all(&pool, &filter).await?;
    Ok(HttpResponse::Ok().json(meetings))
}
