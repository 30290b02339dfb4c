//! Gateway 설정

use std::env;

use sbk_core::config::TokenConfig;

/// Gateway 설정
#[derive(Debug, Clone)]
pub struct Config {
    /// 서버 포트
    pub port: u16,

    /// `/internal/tokens/issue` 활성화 (개발용)
    pub enable_token_issue: bool,

    /// 토큰 스킴/키 설정
    pub token: TokenConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            enable_token_issue: false,
            token: TokenConfig::default(),
        }
    }
}

impl Config {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            port: env::var("SBK_GATEWAY_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,

            enable_token_issue: env::var("SBK_ENABLE_TOKEN_ISSUE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),

            token: TokenConfig::from_env()?,
        })
    }
}
