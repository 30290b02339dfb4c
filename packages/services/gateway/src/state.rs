//! Gateway 앱 상태

use std::sync::Arc;

use sbk_core::auth::TokenCodec;

use crate::config::Config;

/// 앱 상태
///
/// 모든 핸들러와 미들웨어가 공유합니다. 코덱은 불변이므로 잠금이 필요 없습니다.
pub struct AppState {
    /// 설정
    pub config: Config,

    /// 활성 토큰 코덱
    pub tokens: Arc<dyn TokenCodec>,
}

impl AppState {
    /// 설정으로부터 상태 생성
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let tokens = config.token.build_codec()?;
        tracing::info!(scheme = tokens.scheme(), "token codec initialized");
        Ok(Self::with_codec(config.clone(), tokens))
    }

    /// 이미 만들어진 코덱으로 상태 생성
    pub fn with_codec(config: Config, tokens: Arc<dyn TokenCodec>) -> Self {
        Self { config, tokens }
    }
}
