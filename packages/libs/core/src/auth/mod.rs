//! 인증 토큰 모듈
//!
//! - `SessionPayload`: 토큰이 담는 신원 정보
//! - `TokenCodec`: 발급/검증 계약 (JWT, PASETO 두 구현)
//! - `rules`: PASETO claim 검증 규칙
//! - `bearer`: `Authorization` 헤더 파싱

pub mod bearer;
pub mod codec;
pub mod jwt;
pub mod key;
pub mod paseto;
pub mod payload;
pub mod rules;

pub use bearer::{extract_bearer, BearerError, AUTHORIZATION_HEADER, BEARER_SCHEME};
pub use codec::TokenCodec;
pub use jwt::{JwtCodec, MIN_SECRET_LEN};
pub use key::{encode_hex, parse_key_material, KeyEncoding, KeyMaterialError, SYMMETRIC_KEY_LEN};
pub use paseto::{PasetoCodec, PasetoSettings, DEFAULT_IMPLICIT_ASSERTION, DEFAULT_ISSUER};
pub use payload::SessionPayload;
