// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use sample_app::application::dto::responses::{DataResponse, ErrorResponse, MessageResponse};
use serde_json::{json, Value};
use std::time::{Duration, Instant};

use super::helpers::{test_server, test_settings, test_state};

fn settings_with_error_rate(error_rate: f64) -> sample_app::config::settings::Settings {
    let mut settings = test_settings();
    settings.simulation.error_rate = error_rate;
    settings
}

/// 成功分支返回 10 条 id 连续的数据
#[tokio::test]
async fn data_success_returns_sequential_dataset() {
    let state = test_state(settings_with_error_rate(0.0));
    let server = test_server(&state);

    let response = server.get("/api/data").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: DataResponse = response.json();
    assert_eq!(body.data.len(), 10);
    for (expected, point) in body.data.iter().enumerate() {
        assert_eq!(point.id, expected);
        assert!((0.0..100.0).contains(&point.value));
    }
}

/// 失败分支返回固定的错误体
#[tokio::test]
async fn data_failure_returns_generic_error_body() {
    let state = test_state(settings_with_error_rate(1.0));
    let server = test_server(&state);

    let response = server.get("/api/data").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let raw: Value = response.json();
    assert_eq!(raw, json!({ "error": "Internal server error" }));
    assert_eq!(response.json::<ErrorResponse>(), ErrorResponse::internal());
}

/// 数据条数可配置
#[tokio::test]
async fn data_respects_configured_dataset_size() {
    let mut settings = settings_with_error_rate(0.0);
    settings.simulation.dataset_size = 3;
    settings.simulation.max_delay_ms = 0;
    let state = test_state(settings);
    let server = test_server(&state);

    let body: DataResponse = server.get("/api/data").await.json();
    let ids: Vec<usize> = body.data.iter().map(|point| point.id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
}

/// 负载端点至少忙等待 100ms
#[tokio::test]
async fn load_blocks_for_at_least_configured_duration() {
    let state = test_state(test_settings());
    let server = test_server(&state);

    let start = Instant::now();
    let response = server.get("/api/load").await;
    let elapsed = start.elapsed();

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(elapsed >= Duration::from_millis(100), "took {elapsed:?}");
    let body: MessageResponse = response.json();
    assert_eq!(body.message, "Load simulation complete");
}

/// 随机延迟不阻塞并发请求
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn data_delays_overlap_across_concurrent_requests() {
    let mut settings = settings_with_error_rate(0.0);
    settings.simulation.max_delay_ms = 100;
    let state = test_state(settings);
    let server = test_server(&state);

    let start = Instant::now();
    let requests = (0..20).map(|_| async { server.get("/api/data").await.status_code() });
    let statuses = futures::future::join_all(requests).await;

    assert!(statuses.iter().all(|status| *status == StatusCode::OK));
    // Twenty sequential delays would average about one second
    assert!(start.elapsed() < Duration::from_millis(800));
}
