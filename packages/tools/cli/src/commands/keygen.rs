//! 키 생성 명령어

use rand::RngCore;
use sbk_core::auth::{encode_hex, SYMMETRIC_KEY_LEN};

use crate::OutputFormat;

pub fn run(format: OutputFormat) -> anyhow::Result<()> {
    let key = generate_key();

    match format {
        OutputFormat::Text => {
            println!("{}", key);
            eprintln!("Set SBK_SYMMETRIC_KEY to this value to share the key between processes.");
        }
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "key": key }));
        }
    }
    Ok(())
}

fn generate_key() -> String {
    let mut bytes = [0u8; SYMMETRIC_KEY_LEN];
    rand::thread_rng().fill_bytes(&mut bytes);
    encode_hex(&bytes)
}
