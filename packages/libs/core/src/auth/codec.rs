//! 토큰 코덱 추상화
//!
//! 발급/검증 계약을 정의합니다. 호출자는 `Arc<dyn TokenCodec>`만 보유하며
//! 어떤 백엔드(JWT, PASETO)가 활성화되어 있는지 분기하지 않습니다.

use chrono::Duration;

use super::payload::SessionPayload;
use crate::error::Result;

/// 토큰 코덱
///
/// 구현체는 생성 후 불변이며, 여러 스레드/태스크에서 잠금 없이 동시에 호출됩니다.
pub trait TokenCodec: Send + Sync {
    /// 새 세션 페이로드를 만들고 불투명 토큰 문자열로 인코딩합니다.
    ///
    /// 0 또는 음수 기간도 허용됩니다 (이미 만료된 토큰 생성).
    fn issue(&self, username: &str, duration: Duration) -> Result<String>;

    /// 토큰을 디코딩/인증하고 만료를 확인합니다.
    ///
    /// 실패는 `Error::ExpiredToken` 또는 `Error::InvalidToken` 두 가지뿐입니다.
    fn verify(&self, token: &str) -> Result<SessionPayload>;

    /// 로그용 스킴 이름
    fn scheme(&self) -> &'static str;
}
