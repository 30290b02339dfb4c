//! sbk-core: 세션 토큰 핵심 라이브러리
//!
//! Gateway와 CLI가 공유하는 토큰 발급/검증 로직을 제공합니다.
//!
//! # 모듈 구조
//!
//! - `auth`: 세션 페이로드, 토큰 코덱(JWT / PASETO), claim 규칙, bearer 헤더 파싱
//! - `config`: 토큰 스킴 및 키 설정
//! - `error`: 공통 에러 타입

pub mod auth;
pub mod config;
pub mod error;

pub use error::{Error, Result};
