//! Bearer 자격 증명 추출
//!
//! `Authorization: <Scheme> <token>` 헤더 값에서 토큰을 꺼냅니다.
//! 정확히 두 개의 필드여야 하며, 첫 필드는 `Bearer`여야 합니다.

use thiserror::Error;

/// Authorization 헤더 이름
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// 지원하는 인증 스킴
pub const BEARER_SCHEME: &str = "Bearer";

/// 헤더 추출 실패 사유 (로그용, 호출자에게는 노출하지 않음)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BearerError {
    #[error("authorization header is not provided")]
    Missing,

    #[error("authorization header must have exactly two fields")]
    Malformed,

    #[error("unsupported authorization scheme: {0}")]
    UnsupportedScheme(String),
}

/// 헤더 값에서 bearer 토큰 추출
pub fn extract_bearer(header: Option<&str>) -> Result<&str, BearerError> {
    let value = header.filter(|v| !v.is_empty()).ok_or(BearerError::Missing)?;

    let fields: Vec<&str> = value.split_whitespace().collect();
    let [scheme, token] = fields.as_slice() else {
        return Err(BearerError::Malformed);
    };

    if *scheme != BEARER_SCHEME {
        return Err(BearerError::UnsupportedScheme(scheme.to_string()));
    }

    Ok(*token)
}
