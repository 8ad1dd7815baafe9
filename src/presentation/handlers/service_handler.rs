// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::State, Json};

use crate::application::dto::responses::{HealthResponse, ServiceInfoResponse};
use crate::presentation::state::AppState;
use crate::utils::time::iso_timestamp;

/// 服务信息端点
///
/// # 返回值
///
/// 返回服务名称、当前时间和版本号
pub async fn service_info(State(state): State<AppState>) -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        message: state.settings.app.name.clone(),
        timestamp: iso_timestamp(),
        version: state.settings.app.version.clone(),
    })
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回健康状态、当前时间和进程运行时长（秒）
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: iso_timestamp(),
        uptime: state.started_at.elapsed().as_secs_f64(),
    })
}
