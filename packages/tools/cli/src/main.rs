//! sbk CLI (`sbk`)
//!
//! 세션 토큰을 발급/검증하고 대칭 키를 생성하는 운영 도구입니다.

use clap::{Parser, Subcommand};
use sbk_core::config::{TokenConfig, TokenScheme};

mod commands;

#[derive(Parser)]
#[command(name = "sbk")]
#[command(author, version, about = "sbk CLI - session token operator tool", long_about = None)]
struct Cli {
    /// Token scheme (overrides SBK_TOKEN_SCHEME)
    #[arg(long, global = true)]
    scheme: Option<SchemeArg>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum SchemeArg {
    Jwt,
    Paseto,
}

impl From<SchemeArg> for TokenScheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Jwt => TokenScheme::Jwt,
            SchemeArg::Paseto => TokenScheme::Paseto,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random 32-byte symmetric key (hex)
    Keygen,

    /// Issue and inspect session tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Issue a token for a principal
    Issue {
        /// Principal name
        #[arg(long)]
        username: String,

        /// Validity in seconds (defaults to SBK_ACCESS_TOKEN_TTL_SECS; may be negative)
        #[arg(long, allow_hyphen_values = true)]
        ttl_secs: Option<i64>,
    },

    /// Verify a token and print its payload
    Verify {
        /// Opaque token string
        token: String,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sbk_core=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // 설정 로드 (CLI 옵션 > 환경변수)
    let mut config = TokenConfig::from_env()?;
    if let Some(scheme) = cli.scheme {
        config.scheme = scheme.into();
    }

    // 명령 실행
    match cli.command {
        Commands::Keygen => commands::keygen::run(cli.format),

        Commands::Token { action } => match action {
            TokenAction::Issue { username, ttl_secs } => {
                commands::token::issue(&config, cli.format, &username, ttl_secs)
            }
            TokenAction::Verify { token } => commands::token::verify(&config, cli.format, &token),
        },
    }
}
