//! 세션 페이로드
//!
//! 모든 토큰이 담고 다니는 신원 정보입니다. 서버에 저장되지 않으며,
//! 검증 시 토큰을 복호화/디코딩하여 다시 구성됩니다.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// 세션 페이로드
///
/// 생성 이후 변경되지 않습니다. `expired_at`이 `issued_at`보다 이를 수 있으며
/// (0 또는 음수 기간), 만료 여부는 검증 시점에만 판단합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
    id: Uuid,
    username: String,
    issued_at: DateTime<Utc>,
    expired_at: DateTime<Utc>,
}

impl SessionPayload {
    /// 새 페이로드 생성 (랜덤 id, issued_at = now)
    pub fn new(username: &str, duration: Duration) -> Result<Self> {
        if username.is_empty() {
            return Err(Error::InvalidPrincipal);
        }

        let issued_at = Utc::now();
        let expired_at = issued_at
            .checked_add_signed(duration)
            .ok_or(Error::InvalidDuration)?;

        Ok(Self {
            id: Uuid::new_v4(),
            username: username.to_string(),
            issued_at,
            expired_at,
        })
    }

    /// 디코딩된 필드로부터 재구성
    pub(crate) fn from_parts(
        id: Uuid,
        username: String,
        issued_at: DateTime<Utc>,
        expired_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            issued_at,
            expired_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expired_at(&self) -> DateTime<Utc> {
        self.expired_at
    }

    /// 요청된 유효 기간 (expired_at - issued_at)
    pub fn duration(&self) -> Duration {
        self.expired_at - self.issued_at
    }

    /// 주어진 시각 기준 만료 여부
    ///
    /// 만료 시각 자체는 더 이상 유효하지 않습니다.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expired_at
    }

    /// 현재 시각 기준 만료 여부
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// 남은 TTL (초)
    pub fn remaining_ttl(&self) -> i64 {
        let diff = self.expired_at - Utc::now();
        diff.num_seconds().max(0)
    }
}
