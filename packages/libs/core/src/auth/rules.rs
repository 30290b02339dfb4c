//! 복호화된 토큰 claim에 대한 검증 규칙
//!
//! 규칙은 순서대로 평가되며, 첫 번째 위반이 `RuleViolation`으로 반환됩니다.
//! 시간 경과에 의한 위반(`Expired`)만 `Error::ExpiredToken`으로 분류되고
//! 나머지는 모두 `Error::InvalidToken`입니다.

use chrono::{DateTime, Utc};

use crate::error::Error;

/// 규칙이 검사하는 claim 뷰
pub trait RegisteredClaims {
    fn issuer(&self) -> &str;
    fn expiration(&self) -> DateTime<Utc>;
}

/// 규칙 위반 태그
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    /// 만료 시각 경과
    Expired { expired_at: DateTime<Utc> },

    /// 발급자 불일치
    IssuerMismatch { expected: String, actual: String },
}

impl RuleViolation {
    pub fn is_time_based(&self) -> bool {
        matches!(self, RuleViolation::Expired { .. })
    }
}

impl From<RuleViolation> for Error {
    fn from(violation: RuleViolation) -> Self {
        if violation.is_time_based() {
            Error::ExpiredToken
        } else {
            Error::InvalidToken
        }
    }
}

/// 검증 규칙
pub trait ClaimRule: Send + Sync {
    fn check(&self, claims: &dyn RegisteredClaims, now: DateTime<Utc>) -> Result<(), RuleViolation>;
}

/// 만료되지 않았을 것
#[derive(Debug, Clone, Copy, Default)]
pub struct NotExpired;

impl ClaimRule for NotExpired {
    fn check(&self, claims: &dyn RegisteredClaims, now: DateTime<Utc>) -> Result<(), RuleViolation> {
        let expired_at = claims.expiration();
        if now >= expired_at {
            return Err(RuleViolation::Expired { expired_at });
        }
        Ok(())
    }
}

/// 지정된 발급자가 발급했을 것
#[derive(Debug, Clone)]
pub struct IssuedBy(pub String);

impl IssuedBy {
    pub fn new(issuer: impl Into<String>) -> Self {
        Self(issuer.into())
    }
}

impl ClaimRule for IssuedBy {
    fn check(&self, claims: &dyn RegisteredClaims, _now: DateTime<Utc>) -> Result<(), RuleViolation> {
        if claims.issuer() != self.0 {
            return Err(RuleViolation::IssuerMismatch {
                expected: self.0.clone(),
                actual: claims.issuer().to_string(),
            });
        }
        Ok(())
    }
}

/// 규칙을 순서대로 평가
pub fn evaluate(
    rules: &[Box<dyn ClaimRule>],
    claims: &dyn RegisteredClaims,
    now: DateTime<Utc>,
) -> Result<(), RuleViolation> {
    rules.iter().try_for_each(|rule| rule.check(claims, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    struct Claims {
        iss: String,
        exp: DateTime<Utc>,
    }

    impl RegisteredClaims for Claims {
        fn issuer(&self) -> &str {
            &self.iss
        }

        fn expiration(&self) -> DateTime<Utc> {
            self.exp
        }
    }

    fn rules() -> Vec<Box<dyn ClaimRule>> {
        vec![Box::new(IssuedBy::new("simple-bank")), Box::new(NotExpired)]
    }

    #[test]
    fn test_valid_claims_pass() {
        let now = Utc::now();
        let claims = Claims {
            iss: "simple-bank".to_string(),
            exp: now + Duration::minutes(1),
        };
        assert!(evaluate(&rules(), &claims, now).is_ok());
    }

    #[test]
    fn test_expired_maps_to_expired_token() {
        let now = Utc::now();
        let claims = Claims {
            iss: "simple-bank".to_string(),
            exp: now - Duration::seconds(1),
        };

        let violation = evaluate(&rules(), &claims, now).unwrap_err();
        assert!(violation.is_time_based());
        assert!(matches!(Error::from(violation), Error::ExpiredToken));
    }

    #[test]
    fn test_issuer_mismatch_is_invalid_not_expired() {
        let now = Utc::now();
        let claims = Claims {
            iss: "someone-else".to_string(),
            exp: now - Duration::seconds(1),
        };

        let violation = evaluate(&rules(), &claims, now).unwrap_err();
        assert_eq!(
            violation,
            RuleViolation::IssuerMismatch {
                expected: "simple-bank".to_string(),
                actual: "someone-else".to_string(),
            }
        );
        assert!(matches!(Error::from(violation), Error::InvalidToken));
    }

    #[test]
    fn test_expiry_instant_is_expired() {
        let now = Utc::now();
        let claims = Claims {
            iss: "simple-bank".to_string(),
            exp: now,
        };
        assert!(NotExpired.check(&claims, now).is_err());
    }
}
