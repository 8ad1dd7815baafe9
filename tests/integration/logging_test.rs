// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::header::USER_AGENT;
use sample_app::utils::telemetry::json_layer;
use serde_json::Value;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tracing_subscriber::layer::SubscriberExt;

use super::helpers::{test_server, test_settings, test_state};

/// 收集日志输出的内存缓冲区
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    fn records(&self) -> Vec<Value> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

fn records_with_message<'a>(records: &'a [Value], message: &str) -> Vec<&'a Value> {
    records
        .iter()
        .filter(|record| record["message"] == message)
        .collect()
}

/// 每个请求恰好记录一条请求日志
#[tokio::test]
async fn each_request_emits_one_request_record() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::registry().with(json_layer(move || writer.clone()));
    let _guard = tracing::subscriber::set_default(subscriber);

    let state = test_state(test_settings());
    let server = test_server(&state);
    server
        .get("/health")
        .add_query_param("probe", "1")
        .add_header(USER_AGENT, "kube-probe/1.29")
        .await
        .assert_status_ok();

    let records = logs.records();
    let requests = records_with_message(&records, "HTTP request");
    assert_eq!(requests.len(), 1);

    let record = requests[0];
    assert_eq!(record["level"], "INFO");
    assert_eq!(record["method"], "GET");
    assert_eq!(record["url"], "/health?probe=1");
    assert_eq!(record["user_agent"], "kube-probe/1.29");
}

/// 未携带 User-Agent 时不输出该字段
#[tokio::test]
async fn missing_user_agent_is_omitted() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::registry().with(json_layer(move || writer.clone()));
    let _guard = tracing::subscriber::set_default(subscriber);

    let state = test_state(test_settings());
    let server = test_server(&state);
    server.get("/").await.assert_status_ok();

    let records = logs.records();
    let requests = records_with_message(&records, "HTTP request");
    assert_eq!(requests.len(), 1);
    assert!(requests[0].get("user_agent").is_none());
}

/// 模拟失败以 error 级别记录
#[tokio::test]
async fn simulated_failure_is_logged_at_error_level() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::registry().with(json_layer(move || writer.clone()));
    let _guard = tracing::subscriber::set_default(subscriber);

    let mut settings = test_settings();
    settings.simulation.error_rate = 1.0;
    settings.simulation.max_delay_ms = 0;
    let state = test_state(settings);
    let server = test_server(&state);
    server.get("/api/data").await;

    let records = logs.records();
    let failures = records_with_message(&records, "Simulated error occurred");
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0]["level"], "ERROR");
    assert_eq!(failures[0]["endpoint"], "/api/data");
    assert_eq!(failures[0]["error"], "Random error for demonstration");
}

/// 兜底错误中间件记录错误详情与请求信息
#[tokio::test]
async fn unhandled_errors_are_logged_with_request_context() {
    use axum::{routing::get, Router};
    use sample_app::presentation::errors::AppError;
    use sample_app::presentation::routes::with_observability;

    async fn fail() -> Result<&'static str, AppError> {
        Err(anyhow::anyhow!("backend unavailable").into())
    }

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::registry().with(json_layer(move || writer.clone()));
    let _guard = tracing::subscriber::set_default(subscriber);

    let state = test_state(test_settings());
    let app = with_observability(Router::new().route("/fail", get(fail)), state.clone());
    super::helpers::server_for(app).get("/fail").await;

    let records = logs.records();
    let faults = records_with_message(&records, "Unhandled error");
    assert_eq!(faults.len(), 1);
    assert_eq!(faults[0]["level"], "ERROR");
    assert_eq!(faults[0]["error"], "backend unavailable");
    assert_eq!(faults[0]["url"], "/fail");
    assert_eq!(faults[0]["method"], "GET");
}
