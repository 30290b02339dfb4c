//! 인증된 세션 조회

use axum::{Extension, Json};
use sbk_core::auth::SessionPayload;
use serde::Serialize;

/// `/api/me` 응답
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    #[serde(flatten)]
    pub session: SessionPayload,

    /// 남은 TTL (초)
    pub remaining_ttl: i64,
}

/// 세션 게이트가 붙여둔 페이로드를 그대로 반환
pub async fn me(Extension(session): Extension<SessionPayload>) -> Json<SessionResponse> {
    let remaining_ttl = session.remaining_ttl();
    Json(SessionResponse {
        session,
        remaining_ttl,
    })
}
