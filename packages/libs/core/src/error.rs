//! 공통 에러 타입
//!
//! 토큰 발급/검증 경로에서 사용되는 에러 타입을 정의합니다.
//!
//! 검증(`verify`)은 `ExpiredToken`과 `InvalidToken` 두 가지만 반환합니다.
//! 서명 불일치, 잘못된 인코딩, 알고리즘 불일치 등 세부 원인은 로그에만 남기고
//! 호출자에게는 노출하지 않습니다.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// 토큰 코어 에러
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────────
    // Verification Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("token has expired")]
    ExpiredToken,

    #[error("token is invalid")]
    InvalidToken,

    // ─────────────────────────────────────────────────────────────────────────────
    // Issuance / Construction Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("configuration error: {message}")]
    Configuration { message: String },

    #[error("principal name must not be empty")]
    InvalidPrincipal,

    #[error("token duration out of range")]
    InvalidDuration,
}

impl Error {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// 검증 실패(재인증 필요)인지 여부
    pub fn is_verification_failure(&self) -> bool {
        matches!(self, Error::ExpiredToken | Error::InvalidToken)
    }

    /// HTTP 상태 코드로 변환
    pub fn status_code(&self) -> u16 {
        match self {
            // 401 Unauthorized
            Error::ExpiredToken | Error::InvalidToken => 401,

            // 400 Bad Request
            Error::InvalidPrincipal | Error::InvalidDuration => 400,

            // 500 Internal Server Error
            Error::Configuration { .. } => 500,
        }
    }

    /// 에러 코드 (클라이언트용)
    pub fn code(&self) -> &'static str {
        match self {
            Error::ExpiredToken => "TOKEN_EXPIRED",
            Error::InvalidToken => "INVALID_TOKEN",
            Error::Configuration { .. } => "CONFIGURATION_ERROR",
            Error::InvalidPrincipal => "INVALID_PRINCIPAL",
            Error::InvalidDuration => "INVALID_DURATION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_failures_map_to_401() {
        assert_eq!(Error::ExpiredToken.status_code(), 401);
        assert_eq!(Error::InvalidToken.status_code(), 401);
        assert!(Error::ExpiredToken.is_verification_failure());
        assert!(!Error::configuration("short secret").is_verification_failure());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::ExpiredToken.code(), "TOKEN_EXPIRED");
        assert_eq!(Error::InvalidToken.code(), "INVALID_TOKEN");
        assert_eq!(Error::InvalidPrincipal.code(), "INVALID_PRINCIPAL");
        assert_eq!(Error::InvalidDuration.code(), "INVALID_DURATION");
        assert_eq!(Error::InvalidDuration.status_code(), 400);
        assert_eq!(
            Error::configuration("x").to_string(),
            "configuration error: x"
        );
    }
}
