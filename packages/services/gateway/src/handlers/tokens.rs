//! 내부 토큰 엔드포인트
//!
//! - `/internal/tokens/verify`: 다른 서비스가 토큰을 위임 검증
//! - `/internal/tokens/issue`: 개발용 발급 (`SBK_ENABLE_TOKEN_ISSUE=true`일 때만)

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Duration;
use sbk_core::auth::{SessionPayload, BEARER_SCHEME};
use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct VerifyTokenRequest {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyTokenResponse {
    pub valid: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub claims: Option<SessionPayload>,

    /// `TOKEN_EXPIRED` 또는 `INVALID_TOKEN`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

pub async fn verify(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VerifyTokenRequest>,
) -> Json<VerifyTokenResponse> {
    let response = match state.tokens.verify(&req.token) {
        Ok(payload) => VerifyTokenResponse {
            valid: true,
            claims: Some(payload),
            reason: None,
        },
        Err(e) => {
            tracing::debug!(error = %e, "delegated token verification failed");
            VerifyTokenResponse {
                valid: false,
                claims: None,
                reason: Some(e.code()),
            }
        }
    };
    Json(response)
}

#[derive(Debug, Deserialize)]
pub struct IssueTokenRequest {
    pub username: String,

    /// 생략 시 설정된 기본 TTL
    #[serde(default)]
    pub ttl_secs: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct IssueTokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

pub async fn issue(
    State(state): State<Arc<AppState>>,
    Json(req): Json<IssueTokenRequest>,
) -> Result<Json<IssueTokenResponse>> {
    if !state.config.enable_token_issue {
        return Err(GatewayError::NotFound {
            message: "token issuance is disabled".to_string(),
        });
    }

    let ttl_secs = req
        .ttl_secs
        .unwrap_or(state.config.token.access_token_ttl_secs);
    let duration = Duration::try_seconds(ttl_secs).ok_or_else(|| GatewayError::BadRequest {
        message: format!("ttl_secs out of range: {}", ttl_secs),
    })?;
    let access_token = state
        .tokens
        .issue(&req.username, duration)
        .map_err(|e| match e {
            // 현재 시각에 더하면 표현 범위를 넘는 TTL
            sbk_core::Error::InvalidDuration => GatewayError::BadRequest {
                message: format!("ttl_secs out of range: {}", ttl_secs),
            },
            other => other.into(),
        })?;

    tracing::info!(username = %req.username, ttl_secs, "issued access token");

    Ok(Json(IssueTokenResponse {
        access_token,
        token_type: BEARER_SCHEME,
        expires_in: ttl_secs,
    }))
}
