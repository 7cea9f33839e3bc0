use actix_session::SessionExt;
use actix_web::{
    Error, ResponseError,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, header},
    middleware::Next,
    web,
};
use serde_json::json;

use crate::auth::session::{self, get_user_id};
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::user;

/// Rejects requests without a logged-in session with 401.
///
/// The session's user is looked up on every request, so a session that
/// outlives its account is purged and treated as anonymous.
pub async fn require_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let session = req.get_session();

    let Some(user_id) = get_user_id(&session) else {
        let response = AppError::Unauthenticated.error_response();
        return Ok(req.into_response(response).map_into_right_body());
    };

    let Some(pool) = req.app_data::<web::Data<DbPool>>().cloned() else {
        let response = AppError::Session("database pool not registered".into()).error_response();
        return Ok(req.into_response(response).map_into_right_body());
    };

    match user::find_by_id(&pool, user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            log::warn!("session refers to missing user {user_id}; purging");
            session::logout(&session);
            let response = AppError::Unauthenticated.error_response();
            return Ok(req.into_response(response).map_into_right_body());
        }
        Err(e) => {
            return Ok(req.into_response(e.error_response()).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// A request has a body when it declares a non-zero length or a chunked
/// transfer encoding.
fn has_payload(req: &ServiceRequest) -> bool {
    let headers = req.headers();
    if headers.contains_key(header::TRANSFER_ENCODING) {
        return true;
    }
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .is_some_and(|len| len > 0)
}

/// Mutations that send anything must send it as `application/json`. A
/// cross-site HTML form cannot produce that content type, so the session
/// cookie alone cannot be used to forge a write. Bodiless requests with no
/// declared content type (a plain DELETE or logout) pass through.
pub async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();
    let is_mutation = method == Method::POST
        || method == Method::PUT
        || method == Method::PATCH
        || method == Method::DELETE;

    let content_type = req.headers().get(header::CONTENT_TYPE).map(|v| v.to_str().unwrap_or(""));

    if is_mutation
        && (has_payload(&req) || content_type.is_some())
        && !content_type.unwrap_or("").starts_with("application/json")
    {
        let body = json!({
            "error": "Content-Type must be application/json for mutation requests"
        });
        let response = actix_web::HttpResponse::BadRequest().json(body);
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}
