//! 암호화 기반 토큰 (PASETO v4.local)
//!
//! 페이로드를 claim JSON으로 직렬화한 뒤 대칭 키로 인증 암호화합니다.
//! implicit assertion은 암호화되지 않지만 인증 태그에 묶여,
//! 다른 용도로 발급된 토큰이 이 컨텍스트에서 재사용되지 않도록 합니다.
//!
//! 복호화에 성공한 뒤에만 claim을 파싱하고 `IssuedBy`, `NotExpired` 규칙을 평가합니다.

use std::fmt;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use rusty_paseto::core::{
    Footer, ImplicitAssertion, Key, Local, Paseto, PasetoNonce, PasetoSymmetricKey, Payload, V4,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::codec::TokenCodec;
use super::key::SYMMETRIC_KEY_LEN;
use super::payload::SessionPayload;
use super::rules::{self, ClaimRule, IssuedBy, NotExpired, RegisteredClaims};
use crate::error::{Error, Result};

/// 기본 발급자
pub const DEFAULT_ISSUER: &str = "simple-bank";

/// 기본 implicit assertion
pub const DEFAULT_IMPLICIT_ASSERTION: &str = "sbk:access-token";

const TOKEN_HEADER: &str = "v4.local.";

/// nonce(32) + tag(32)
const MIN_BODY_LEN: usize = 64;

/// PASETO 코덱 설정
#[derive(Clone)]
pub struct PasetoSettings {
    /// 대칭 키. `None`이면 프로세스 수명 동안만 유효한 임시 키를 생성합니다.
    pub key: Option<[u8; SYMMETRIC_KEY_LEN]>,

    /// `iss` claim
    pub issuer: String,

    /// implicit assertion
    pub implicit_assertion: String,
}

impl Default for PasetoSettings {
    fn default() -> Self {
        Self {
            key: None,
            issuer: DEFAULT_ISSUER.to_string(),
            implicit_assertion: DEFAULT_IMPLICIT_ASSERTION.to_string(),
        }
    }
}

impl fmt::Debug for PasetoSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasetoSettings")
            .field("key", &self.key.map(|_| "[REDACTED]"))
            .field("issuer", &self.issuer)
            .field("implicit_assertion", &self.implicit_assertion)
            .finish()
    }
}

/// 토큰 내부 claim 구조
#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    iss: String,
    iat: DateTime<Utc>,
    exp: DateTime<Utc>,
    username: String,
    id: String,
}

impl RegisteredClaims for TokenClaims {
    fn issuer(&self) -> &str {
        &self.iss
    }

    fn expiration(&self) -> DateTime<Utc> {
        self.exp
    }
}

/// PASETO 코덱
pub struct PasetoCodec {
    key: PasetoSymmetricKey<V4, Local>,
    issuer: String,
    implicit_assertion: String,
    rules: Vec<Box<dyn ClaimRule>>,
}

impl PasetoCodec {
    /// 임시 키와 기본 설정으로 생성
    pub fn new() -> Result<Self> {
        Self::with_settings(PasetoSettings::default())
    }

    /// 주어진 설정으로 생성
    pub fn with_settings(settings: PasetoSettings) -> Result<Self> {
        let key = match settings.key {
            Some(bytes) => Key::from(bytes),
            None => {
                tracing::warn!("no symmetric key configured; generating an ephemeral paseto key");
                Key::from(random_key_bytes()?)
            }
        };

        // 발급자 검사가 먼저: 신뢰할 수 없는 토큰은 만료 여부와 무관하게 invalid
        let rules: Vec<Box<dyn ClaimRule>> = vec![
            Box::new(IssuedBy::new(settings.issuer.clone())),
            Box::new(NotExpired),
        ];

        Ok(Self {
            key: PasetoSymmetricKey::<V4, Local>::from(key),
            issuer: settings.issuer,
            implicit_assertion: settings.implicit_assertion,
            rules,
        })
    }

    fn decrypt(&self, token: &str) -> Result<String> {
        if !has_valid_structure(token) {
            tracing::debug!("paseto token structure rejected");
            return Err(Error::InvalidToken);
        }

        Paseto::<V4, Local>::try_decrypt(
            token,
            &self.key,
            None::<Footer>,
            ImplicitAssertion::from(self.implicit_assertion.as_str()),
        )
        .map_err(|e| {
            tracing::debug!(error = %e, "paseto decryption failed");
            Error::InvalidToken
        })
    }
}

impl TokenCodec for PasetoCodec {
    fn issue(&self, username: &str, duration: Duration) -> Result<String> {
        let payload = SessionPayload::new(username, duration)?;
        let claims = TokenClaims {
            iss: self.issuer.clone(),
            iat: payload.issued_at(),
            exp: payload.expired_at(),
            username: payload.username().to_string(),
            id: payload.id().to_string(),
        };
        let json = serde_json::to_string(&claims)
            .map_err(|e| Error::configuration(format!("failed to encode claims: {}", e)))?;

        let nonce_key = Key::from(random_key_bytes()?);
        let nonce = PasetoNonce::<V4, Local>::from(&nonce_key);

        Paseto::<V4, Local>::builder()
            .set_payload(Payload::from(json.as_str()))
            .set_implicit_assertion(ImplicitAssertion::from(self.implicit_assertion.as_str()))
            .try_encrypt(&self.key, &nonce)
            .map_err(|e| Error::configuration(format!("failed to encrypt token: {}", e)))
    }

    fn verify(&self, token: &str) -> Result<SessionPayload> {
        let decrypted = self.decrypt(token)?;

        let claims: TokenClaims = serde_json::from_str(&decrypted).map_err(|e| {
            tracing::debug!(error = %e, "paseto claims are malformed");
            Error::InvalidToken
        })?;

        let id = Uuid::parse_str(&claims.id).map_err(|e| {
            tracing::debug!(error = %e, "paseto token id is not a uuid");
            Error::InvalidToken
        })?;

        if claims.username.is_empty() {
            tracing::debug!("paseto token carries an empty principal");
            return Err(Error::InvalidToken);
        }

        rules::evaluate(&self.rules, &claims, Utc::now()).map_err(|violation| {
            tracing::debug!(?violation, "paseto claim rule failed");
            Error::from(violation)
        })?;

        Ok(SessionPayload::from_parts(
            id,
            claims.username,
            claims.iat,
            claims.exp,
        ))
    }

    fn scheme(&self) -> &'static str {
        "paseto"
    }
}

impl fmt::Debug for PasetoCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasetoCodec")
            .field("key", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("implicit_assertion", &self.implicit_assertion)
            .finish()
    }
}

/// OS 난수로 32바이트 생성 (키, nonce 공용)
fn random_key_bytes() -> Result<[u8; SYMMETRIC_KEY_LEN]> {
    let mut bytes = [0u8; SYMMETRIC_KEY_LEN];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| Error::configuration(format!("secure random generation failed: {}", e)))?;
    Ok(bytes)
}

/// `v4.local.<base64url>` 구조 및 최소 길이 확인 (footer 미사용)
fn has_valid_structure(token: &str) -> bool {
    let Some(body) = token.strip_prefix(TOKEN_HEADER) else {
        return false;
    };
    if body.contains('.') {
        return false;
    }

    match URL_SAFE_NO_PAD.decode(body) {
        Ok(bytes) => bytes.len() > MIN_BODY_LEN,
        Err(_) => false,
    }
}
