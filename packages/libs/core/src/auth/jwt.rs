//! 서명 기반 토큰 (JWT, HS256)
//!
//! 페이로드의 네 필드를 claim으로 직렬화하고 HMAC-SHA256으로 서명합니다.
//! claim은 암호화되지 않으므로 누구나 읽을 수 있지만, 서명 검증 전에는 신뢰하지 않습니다.
//!
//! # 검증 순서
//!
//! 1. 헤더의 `alg`가 HS256이 아니면 즉시 거부 (알고리즘 혼동 방지)
//! 2. 서명 재계산 및 상수 시간 비교
//! 3. 인증 성공 후에만 claim 파싱 및 만료 확인

use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::codec::TokenCodec;
use super::payload::SessionPayload;
use crate::error::{Error, Result};

/// 최소 시크릿 길이 (바이트)
pub const MIN_SECRET_LEN: usize = 32;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT 코덱
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtCodec {
    /// 새 코덱 생성
    ///
    /// 시크릿이 `MIN_SECRET_LEN`보다 짧으면 실패합니다.
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self> {
        let secret = secret.as_ref();
        if secret.len() < MIN_SECRET_LEN {
            return Err(Error::configuration(format!(
                "jwt secret must be at least {} bytes, got {}",
                MIN_SECRET_LEN,
                secret.len()
            )));
        }

        // 만료는 SessionPayload 기준으로 직접 판단 (leeway 없음, 초 단위 절삭 없음)
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }
}

impl TokenCodec for JwtCodec {
    fn issue(&self, username: &str, duration: Duration) -> Result<String> {
        let payload = SessionPayload::new(username, duration)?;

        encode(&Header::new(ALGORITHM), &payload, &self.encoding_key)
            .map_err(|e| Error::configuration(format!("failed to sign jwt: {}", e)))
    }

    fn verify(&self, token: &str) -> Result<SessionPayload> {
        let header = decode_header(token).map_err(|e| {
            tracing::debug!(error = %e, "jwt header rejected");
            Error::InvalidToken
        })?;

        if header.alg != ALGORITHM {
            tracing::debug!(alg = ?header.alg, "jwt signed with unexpected algorithm");
            return Err(Error::InvalidToken);
        }

        let data = decode::<SessionPayload>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "jwt verification failed");
                Error::InvalidToken
            })?;
        let payload = data.claims;

        if payload.username().is_empty() {
            tracing::debug!("jwt carries an empty principal");
            return Err(Error::InvalidToken);
        }

        if payload.is_expired_at(Utc::now()) {
            return Err(Error::ExpiredToken);
        }

        Ok(payload)
    }

    fn scheme(&self) -> &'static str {
        "jwt"
    }
}

impl fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JwtCodec([REDACTED])")
    }
}
