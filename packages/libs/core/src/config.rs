//! 토큰 설정
//!
//! 키 material과 스킴 선택을 명시적인 설정 구조체로 전달합니다.
//! Gateway와 CLI가 같은 환경변수 규칙을 공유합니다.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::Duration;

use crate::auth::{
    parse_key_material, JwtCodec, PasetoCodec, PasetoSettings, TokenCodec,
    DEFAULT_IMPLICIT_ASSERTION, DEFAULT_ISSUER,
};
use crate::error::{Error, Result};

/// 기본 access token TTL (초)
pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: i64 = 900;

/// 토큰 스킴
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenScheme {
    /// HMAC-SHA256 서명 JWT
    Jwt,

    /// PASETO v4.local (기본값)
    #[default]
    Paseto,
}

impl TokenScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenScheme::Jwt => "jwt",
            TokenScheme::Paseto => "paseto",
        }
    }
}

impl FromStr for TokenScheme {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "jwt" => Ok(TokenScheme::Jwt),
            "paseto" => Ok(TokenScheme::Paseto),
            other => Err(Error::configuration(format!("unknown token scheme: {}", other))),
        }
    }
}

/// 토큰 설정
#[derive(Clone)]
pub struct TokenConfig {
    /// 활성 스킴
    pub scheme: TokenScheme,

    /// 대칭 키 material (JWT: 32바이트 이상 시크릿, PASETO: 32바이트 키)
    pub symmetric_key: Option<String>,

    /// PASETO `iss` claim
    pub issuer: String,

    /// PASETO implicit assertion
    pub implicit_assertion: String,

    /// Access token TTL (초)
    pub access_token_ttl_secs: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            scheme: TokenScheme::default(),
            symmetric_key: None,
            issuer: DEFAULT_ISSUER.to_string(),
            implicit_assertion: DEFAULT_IMPLICIT_ASSERTION.to_string(),
            access_token_ttl_secs: DEFAULT_ACCESS_TOKEN_TTL_SECS,
        }
    }
}

impl TokenConfig {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let scheme = match env::var("SBK_TOKEN_SCHEME") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.scheme,
        };

        let access_token_ttl_secs = match env::var("SBK_ACCESS_TOKEN_TTL_SECS") {
            Ok(value) => value.trim().parse().map_err(|_| {
                Error::configuration(format!("invalid SBK_ACCESS_TOKEN_TTL_SECS: {}", value))
            })?,
            Err(_) => defaults.access_token_ttl_secs,
        };

        Ok(Self {
            scheme,
            symmetric_key: env::var("SBK_SYMMETRIC_KEY")
                .ok()
                .filter(|v| !v.is_empty()),
            issuer: env::var("SBK_TOKEN_ISSUER").unwrap_or(defaults.issuer),
            implicit_assertion: env::var("SBK_TOKEN_IMPLICIT").unwrap_or(defaults.implicit_assertion),
            access_token_ttl_secs,
        })
    }

    /// Access token 유효 기간
    pub fn access_token_duration(&self) -> Result<Duration> {
        Duration::try_seconds(self.access_token_ttl_secs).ok_or_else(|| {
            Error::configuration(format!(
                "access token ttl out of range: {}",
                self.access_token_ttl_secs
            ))
        })
    }

    /// 설정된 스킴의 코덱 생성
    pub fn build_codec(&self) -> Result<Arc<dyn TokenCodec>> {
        match self.scheme {
            TokenScheme::Jwt => {
                let secret = self.symmetric_key.as_deref().ok_or_else(|| {
                    Error::configuration("SBK_SYMMETRIC_KEY is required for the jwt scheme")
                })?;
                Ok(Arc::new(JwtCodec::new(secret)?))
            }
            TokenScheme::Paseto => {
                let key = match self.symmetric_key.as_deref() {
                    Some(raw) => Some(parse_key_material(raw).map_err(|e| {
                        Error::configuration(format!("invalid SBK_SYMMETRIC_KEY: {}", e))
                    })?),
                    None => None,
                };
                Ok(Arc::new(PasetoCodec::with_settings(PasetoSettings {
                    key,
                    issuer: self.issuer.clone(),
                    implicit_assertion: self.implicit_assertion.clone(),
                })?))
            }
        }
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("scheme", &self.scheme)
            .field("symmetric_key", &self.symmetric_key.as_ref().map(|_| "[REDACTED]"))
            .field("issuer", &self.issuer)
            .field("implicit_assertion", &self.implicit_assertion)
            .field("access_token_ttl_secs", &self.access_token_ttl_secs)
            .finish()
    }
}
