//! 대칭 키 material 파싱
//!
//! 설정으로 전달된 32바이트 키를 해석합니다. 아래 순서로 디코딩을 시도하고
//! 처음으로 정확히 32바이트가 되는 해석을 채택합니다.
//!
//! 1. hex (`sbk keygen` 출력 형식)
//! 2. base64url (no padding)
//! 3. base64 (standard)
//! 4. 원문 바이트

use base64::{engine::general_purpose, Engine as _};
use thiserror::Error;

/// 대칭 키 길이 (바이트)
pub const SYMMETRIC_KEY_LEN: usize = 32;

/// 키 material 거부 사유
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyMaterialError {
    #[error("key material is empty")]
    Empty,

    #[error("key material must decode to 32 bytes, got {actual} bytes as {encoding}")]
    WrongLength {
        encoding: KeyEncoding,
        actual: usize,
    },
}

/// 키 인코딩 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEncoding {
    Hex,
    Base64Url,
    Base64,
    Raw,
}

impl KeyEncoding {
    const PRECEDENCE: [KeyEncoding; 4] = [
        KeyEncoding::Hex,
        KeyEncoding::Base64Url,
        KeyEncoding::Base64,
        KeyEncoding::Raw,
    ];

    /// 이 형식으로 해석할 수 없으면 `None`
    fn decode(self, input: &str) -> Option<Vec<u8>> {
        match self {
            KeyEncoding::Hex => decode_hex(input),
            KeyEncoding::Base64Url => general_purpose::URL_SAFE_NO_PAD.decode(input).ok(),
            KeyEncoding::Base64 => general_purpose::STANDARD.decode(input).ok(),
            KeyEncoding::Raw => Some(input.as_bytes().to_vec()),
        }
    }
}

impl std::fmt::Display for KeyEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            KeyEncoding::Hex => "hex",
            KeyEncoding::Base64Url => "base64url",
            KeyEncoding::Base64 => "base64",
            KeyEncoding::Raw => "raw bytes",
        };
        f.write_str(name)
    }
}

/// 설정 값을 32바이트 키로 해석
///
/// 어떤 형식으로도 32바이트가 되지 않으면, 가장 우선순위가 높은 해석의 길이를 담아 거부합니다.
pub fn parse_key_material(raw: &str) -> Result<[u8; SYMMETRIC_KEY_LEN], KeyMaterialError> {
    let input = raw.trim();
    if input.is_empty() {
        return Err(KeyMaterialError::Empty);
    }

    let mut first_mismatch = None;
    for encoding in KeyEncoding::PRECEDENCE {
        let Some(bytes) = encoding.decode(input) else {
            continue;
        };
        match <[u8; SYMMETRIC_KEY_LEN]>::try_from(bytes.as_slice()) {
            Ok(key) => return Ok(key),
            Err(_) => {
                first_mismatch.get_or_insert(KeyMaterialError::WrongLength {
                    encoding,
                    actual: bytes.len(),
                });
            }
        }
    }

    // Raw는 항상 디코딩되므로 여기서는 불일치가 하나 이상 기록되어 있음
    Err(first_mismatch.unwrap_or(KeyMaterialError::Empty))
}

/// 키를 소문자 hex로 인코딩 (`sbk keygen` 출력용)
pub fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn decode_hex(input: &str) -> Option<Vec<u8>> {
    if input.len() % 2 != 0 || !input.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    input
        .as_bytes()
        .chunks_exact(2)
        .map(|pair| {
            let pair = std::str::from_utf8(pair).ok()?;
            u8::from_str_radix(pair, 16).ok()
        })
        .collect()
}
