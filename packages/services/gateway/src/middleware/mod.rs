//! Gateway 미들웨어
//!
//! 요청 ID 부여와 bearer 세션 인증을 정의합니다.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use sbk_core::auth::{extract_bearer, AUTHORIZATION_HEADER};
use uuid::Uuid;

use crate::error::{GatewayError, Result};
use crate::state::AppState;

tokio::task_local! {
    static REQUEST_ID: String;
}

pub fn current_request_id() -> Option<String> {
    REQUEST_ID.try_with(|id| id.clone()).ok()
}

pub async fn request_id(req: Request, next: Next) -> Response {
    let id = Uuid::new_v4().to_string();
    let mut resp = REQUEST_ID.scope(id.clone(), async move { next.run(req).await }).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        resp.headers_mut().insert("x-request-id", value);
    }
    resp
}

/// 세션 인증 게이트
///
/// `Authorization: Bearer <token>`을 검증하고 `SessionPayload`를 요청 extension에 붙입니다.
/// 실패 사유는 로그에만 남기고 응답은 항상 동일한 401입니다.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    let header = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok());

    let token = extract_bearer(header).map_err(|e| {
        tracing::warn!(path = %req.uri().path(), error = %e, "rejected request credentials");
        GatewayError::Unauthorized
    })?;

    let payload = state.tokens.verify(token).map_err(|e| {
        tracing::warn!(path = %req.uri().path(), error = %e, "rejected session token");
        GatewayError::Unauthorized
    })?;

    tracing::debug!(username = payload.username(), session_id = %payload.id(), "session authenticated");
    req.extensions_mut().insert(payload);

    Ok(next.run(req).await)
}
