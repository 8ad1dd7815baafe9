// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{http::StatusCode, routing::get, Router};
use sample_app::infrastructure::observability::metrics::HTTP_REQUESTS_TOTAL;
use sample_app::presentation::errors::AppError;
use sample_app::presentation::routes::with_observability;
use sample_app::presentation::state::AppState;
use serde_json::{json, Value};

use super::helpers::{active_connections, has_sample, server_for, test_settings, test_state};

async fn explode() -> &'static str {
    panic!("handler exploded")
}

async fn fail() -> Result<&'static str, AppError> {
    Err(anyhow::anyhow!("backend unavailable").into())
}

fn faulty_app(state: &AppState) -> Router {
    let router = Router::new()
        .route("/explode", get(explode))
        .route("/fail", get(fail));
    with_observability(router, state.clone())
}

/// handler panic 被兜底中间件转为通用 500
#[tokio::test]
async fn panicking_handler_returns_generic_500() {
    let state = test_state(test_settings());
    let server = server_for(faulty_app(&state));

    let response = server.get("/explode").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Internal server error" })
    );
}

/// panic 之后活跃连接数恢复，且请求按 500 计数
#[tokio::test]
async fn panicking_handler_is_still_instrumented() {
    let state = test_state(test_settings());
    let server = server_for(faulty_app(&state));

    server.get("/explode").await;

    assert_eq!(active_connections(&state), 0.0);
    assert!(has_sample(
        &state.metrics.render(),
        HTTP_REQUESTS_TOTAL,
        &[r#"status="500""#, r#"route="/explode""#],
        "1"
    ));
}

/// 返回 AppError 的处理器同样得到通用 500
#[tokio::test]
async fn app_error_returns_generic_500() {
    let state = test_state(test_settings());
    let server = server_for(faulty_app(&state));

    let response = server.get("/fail").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Internal server error" })
    );
    assert_eq!(active_connections(&state), 0.0);
}

/// 服务在 panic 后继续处理后续请求
#[tokio::test]
async fn server_keeps_serving_after_a_fault() {
    let state = test_state(test_settings());
    let server = server_for(faulty_app(&state));

    server.get("/explode").await;
    let response = server.get("/fail").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}
