//! sbk Gateway
//!
//! Bearer 세션 토큰을 검증하고, 인증된 신원을 하위 핸들러에 전달합니다.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod handlers;
mod middleware;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 환경변수 로드
    dotenvy::dotenv().ok();

    // 로깅 초기화
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "sbk_gateway=debug,sbk_core=info,tower_http=debug".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 설정 로드
    let config = Config::from_env()?;
    tracing::info!("Starting Gateway with config: {:?}", config);

    // 앱 상태 초기화
    let state = Arc::new(AppState::new(&config)?);

    // 라우터 구성
    let app = create_router(state);

    // 서버 시작
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Gateway listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// 라우터 생성
fn create_router(state: Arc<AppState>) -> Router {
    // 세션 게이트 뒤에 있는 라우트
    let protected = Router::new()
        .route("/api/me", get(handlers::session::me))
        .route_layer(from_fn_with_state(state.clone(), middleware::require_session));

    Router::new()
        .merge(protected)
        // Internal
        .route("/internal/tokens/verify", post(handlers::tokens::verify))
        .route("/internal/tokens/issue", post(handlers::tokens::issue))
        // Health check
        .route("/health", get(handlers::health::health_check))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(from_fn(middleware::request_id))
        // State
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use chrono::Duration;
    use sbk_core::auth::{JwtCodec, PasetoCodec, TokenCodec};
    use serde_json::Value;
    use tower::ServiceExt;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn codecs() -> Vec<Arc<dyn TokenCodec>> {
        vec![
            Arc::new(JwtCodec::new(SECRET).unwrap()),
            Arc::new(PasetoCodec::new().unwrap()),
        ]
    }

    fn app(codec: Arc<dyn TokenCodec>, config: Config) -> Router {
        create_router(Arc::new(AppState::with_codec(config, codec)))
    }

    async fn get_me(router: Router, authorization: Option<String>) -> Response {
        let mut builder = Request::builder().uri("/api/me");
        if let Some(value) = authorization {
            builder = builder.header("Authorization", value);
        }
        router
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_json(router: Router, uri: &str, body: Value) -> Response {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        router.oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_valid_bearer_attaches_principal() {
        for codec in codecs() {
            let token = codec.issue("thanh", Duration::minutes(1)).unwrap();
            let response = get_me(app(codec, Config::default()), Some(format!("Bearer {}", token))).await;

            assert_eq!(response.status(), StatusCode::OK);
            assert!(response.headers().contains_key("x-request-id"));
            let body = json_body(response).await;
            assert_eq!(body["username"], "thanh");
            assert!(body["remaining_ttl"].as_i64().unwrap() > 0);
        }
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        for codec in codecs() {
            let response = get_me(app(codec, Config::default()), None).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

            let body = json_body(response).await;
            assert_eq!(body["error"]["code"], "UNAUTHORIZED");
            assert!(body["error"]["requestId"].is_string());
        }
    }

    #[tokio::test]
    async fn test_wrong_scheme_is_unauthorized() {
        for codec in codecs() {
            let token = codec.issue("thanh", Duration::minutes(1)).unwrap();
            let response = get_me(app(codec, Config::default()), Some(format!("Token {}", token))).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn test_malformed_header_is_unauthorized() {
        for codec in codecs() {
            let token = codec.issue("thanh", Duration::minutes(1)).unwrap();
            let response = get_me(app(codec, Config::default()), Some(format!(" {}", token))).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn test_expired_and_invalid_tokens_look_the_same() {
        for codec in codecs() {
            let expired = codec.issue("thanh", Duration::minutes(-1)).unwrap();
            let response = get_me(app(codec.clone(), Config::default()), Some(format!("Bearer {}", expired))).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            let expired_body = json_body(response).await;

            let response = get_me(app(codec, Config::default()), Some("Bearer garbage".to_string())).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            let invalid_body = json_body(response).await;

            assert_eq!(expired_body["error"]["code"], invalid_body["error"]["code"]);
            assert_eq!(expired_body["error"]["message"], invalid_body["error"]["message"]);
        }
    }

    #[tokio::test]
    async fn test_internal_verify_reports_reason() {
        for codec in codecs() {
            let valid = codec.issue("thanh", Duration::minutes(1)).unwrap();
            let expired = codec.issue("thanh", Duration::seconds(-1)).unwrap();
            let router = app(codec, Config::default());

            let body = json_body(post_json(router.clone(), "/internal/tokens/verify", serde_json::json!({ "token": valid })).await).await;
            assert_eq!(body["valid"], true);
            assert_eq!(body["claims"]["username"], "thanh");

            let body = json_body(post_json(router.clone(), "/internal/tokens/verify", serde_json::json!({ "token": expired })).await).await;
            assert_eq!(body["valid"], false);
            assert_eq!(body["reason"], "TOKEN_EXPIRED");

            let body = json_body(post_json(router, "/internal/tokens/verify", serde_json::json!({ "token": "nope" })).await).await;
            assert_eq!(body["valid"], false);
            assert_eq!(body["reason"], "INVALID_TOKEN");
        }
    }

    #[tokio::test]
    async fn test_issue_disabled_by_default() {
        let codec: Arc<dyn TokenCodec> = Arc::new(PasetoCodec::new().unwrap());
        let response = post_json(
            app(codec, Config::default()),
            "/internal/tokens/issue",
            serde_json::json!({ "username": "thanh" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_issued_token_passes_gate() {
        let config = Config {
            enable_token_issue: true,
            ..Config::default()
        };
        for codec in codecs() {
            let router = app(codec, config.clone());

            let response = post_json(
                router.clone(),
                "/internal/tokens/issue",
                serde_json::json!({ "username": "thanh", "ttl_secs": 60 }),
            )
            .await;
            assert_eq!(response.status(), StatusCode::OK);
            let body = json_body(response).await;
            assert_eq!(body["token_type"], "Bearer");
            assert_eq!(body["expires_in"], 60);

            let token = body["access_token"].as_str().unwrap().to_string();
            let response = get_me(router, Some(format!("Bearer {}", token))).await;
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn test_issue_rejects_bad_input() {
        let config = Config {
            enable_token_issue: true,
            ..Config::default()
        };
        let codec: Arc<dyn TokenCodec> = Arc::new(PasetoCodec::new().unwrap());
        let router = app(codec, config);

        let response = post_json(
            router.clone(),
            "/internal/tokens/issue",
            serde_json::json!({ "username": "" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "INVALID_PRINCIPAL");

        let response = post_json(
            router.clone(),
            "/internal/tokens/issue",
            serde_json::json!({ "username": "thanh", "ttl_secs": i64::MAX }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_issue_rejects_ttl_past_calendar_range() {
        let config = Config {
            enable_token_issue: true,
            ..Config::default()
        };
        for codec in codecs() {
            // Duration으로는 표현되지만 now + ttl이 DateTime 범위를 넘는 값
            let response = post_json(
                app(codec, config.clone()),
                "/internal/tokens/issue",
                serde_json::json!({ "username": "thanh", "ttl_secs": i64::MAX / 1000 }),
            )
            .await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let body = json_body(response).await;
            assert_eq!(body["error"]["code"], "BAD_REQUEST");
            assert!(body["error"]["message"]
                .as_str()
                .unwrap()
                .contains("ttl_secs out of range"));
        }
    }

    #[tokio::test]
    async fn test_health() {
        let codec: Arc<dyn TokenCodec> = Arc::new(PasetoCodec::new().unwrap());
        let response = app(codec, Config::default())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }
}
