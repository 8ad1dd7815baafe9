// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error};

use crate::application::dto::responses::{DataResponse, ErrorResponse, MessageResponse};
use crate::presentation::state::AppState;

/// 样本数据端点
///
/// 先异步等待一个随机延迟，再独立抽样决定是否模拟失败
pub async fn get_data(State(state): State<AppState>) -> Response {
    let delay = state.simulator.random_delay();
    tokio::time::sleep(delay).await;

    if state.simulator.should_fail() {
        error!(
            endpoint = "/api/data",
            error = "Random error for demonstration",
            "Simulated error occurred"
        );
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal()),
        )
            .into_response();
    }

    Json(DataResponse {
        data: state.simulator.generate_dataset(),
    })
    .into_response()
}

/// CPU 负载端点
///
/// 直接在当前工作线程上忙等待，期间阻塞该线程上的其他请求
pub async fn simulate_load(State(state): State<AppState>) -> Json<MessageResponse> {
    let elapsed = state.simulator.burn_cpu();
    debug!(
        elapsed_ms = elapsed.as_millis() as u64,
        target_ms = state.simulator.load_duration().as_millis() as u64,
        "Load simulation finished"
    );

    Json(MessageResponse {
        message: "Load simulation complete".to_string(),
    })
}
