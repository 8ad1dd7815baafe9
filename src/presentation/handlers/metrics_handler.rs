// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Context;
use axum::{
    extract::State,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::debug;

use crate::infrastructure::observability::metrics::CONTENT_TYPE as EXPOSITION_CONTENT_TYPE;
use crate::presentation::errors::AppError;
use crate::presentation::state::AppState;

/// Prometheus 指标端点
///
/// 渲染在阻塞线程池中完成，不占用异步工作线程
pub async fn metrics(State(state): State<AppState>) -> Result<Response, AppError> {
    let registry = Arc::clone(&state.metrics);
    let body = tokio::task::spawn_blocking(move || registry.render())
        .await
        .context("rendering metrics")?;

    debug!(bytes = body.len(), "Metrics rendered");
    Ok(([(CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)], body).into_response())
}
