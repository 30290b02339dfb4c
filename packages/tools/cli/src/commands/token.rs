//! 토큰 명령어

use anyhow::Context as _;
use chrono::Duration;
use sbk_core::auth::{SessionPayload, TokenCodec};
use sbk_core::config::{TokenConfig, TokenScheme};

use crate::OutputFormat;

pub fn issue(
    config: &TokenConfig,
    format: OutputFormat,
    username: &str,
    ttl_secs: Option<i64>,
) -> anyhow::Result<()> {
    let codec = config.build_codec().context("failed to build token codec")?;
    let duration = match ttl_secs {
        Some(secs) => Duration::try_seconds(secs)
            .ok_or_else(|| anyhow::anyhow!("ttl out of range: {}", secs))?,
        None => config.access_token_duration()?,
    };

    let token = codec.issue(username, duration)?;

    match format {
        OutputFormat::Text => println!("{}", token),
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "scheme": config.scheme.as_str(),
                "access_token": token,
                "expires_in": duration.num_seconds(),
            })
        ),
    }
    Ok(())
}

pub fn verify(config: &TokenConfig, format: OutputFormat, token: &str) -> anyhow::Result<()> {
    require_persistent_key(config)?;
    let codec = config.build_codec().context("failed to build token codec")?;

    match verify_with(codec.as_ref(), token) {
        Ok(payload) => {
            match format {
                OutputFormat::Text => print_payload(&payload),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&payload)?),
            }
            Ok(())
        }
        Err(e) => {
            if let OutputFormat::Json = format {
                println!("{}", serde_json::json!({ "valid": false, "reason": e.code() }));
            }
            Err(anyhow::anyhow!("token rejected: {}", e))
        }
    }
}

/// 임시 PASETO 키는 프로세스마다 새로 만들어지므로 다른 실행에서 발급한 토큰을 검증할 수 없음
fn require_persistent_key(config: &TokenConfig) -> anyhow::Result<()> {
    if config.scheme == TokenScheme::Paseto && config.symmetric_key.is_none() {
        anyhow::bail!(
            "SBK_SYMMETRIC_KEY is not set; the paseto scheme would use a throwaway key \
             that cannot verify tokens from another process (run `sbk keygen` to create one)"
        );
    }
    Ok(())
}

fn verify_with(codec: &dyn TokenCodec, token: &str) -> sbk_core::Result<SessionPayload> {
    let payload = codec.verify(token.trim())?;
    tracing::debug!(scheme = codec.scheme(), session_id = %payload.id(), "token verified");
    Ok(payload)
}

fn print_payload(payload: &SessionPayload) {
    println!("Token is valid.");
    println!("  id:         {}", payload.id());
    println!("  username:   {}", payload.username());
    println!("  issued_at:  {}", payload.issued_at().to_rfc3339());
    println!("  expired_at: {}", payload.expired_at().to_rfc3339());
    println!("  remaining:  {}s", payload.remaining_ttl());
}
