// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{middleware, routing::get, Router};

use crate::presentation::handlers::{metrics_handler, service_handler, simulation_handler};
use crate::presentation::middleware::{
    error_middleware::error_middleware, metrics_middleware::metrics_middleware,
    request_logging_middleware::request_logging_middleware,
};
use crate::presentation::state::AppState;

/// 固定路由路径
pub const SERVICE_ROUTE: &str = "/";
pub const HEALTH_ROUTE: &str = "/health";
pub const METRICS_ROUTE: &str = "/metrics";
pub const DATA_ROUTE: &str = "/api/data";
pub const LOAD_ROUTE: &str = "/api/load";

/// 创建应用路由
///
/// # 参数
///
/// * `state` - 应用状态
///
/// # 返回值
///
/// 返回挂载了全部中间件的路由。各路由的指标序列在此预先登记，
/// 首次抓取 `/metrics` 即包含全部自定义指标。
pub fn routes(state: AppState) -> Router {
    state.metrics.register_routes(
        "GET",
        &[SERVICE_ROUTE, HEALTH_ROUTE, METRICS_ROUTE, DATA_ROUTE, LOAD_ROUTE],
    );

    let router = Router::new()
        .route(SERVICE_ROUTE, get(service_handler::service_info))
        .route(HEALTH_ROUTE, get(service_handler::health_check))
        .route(METRICS_ROUTE, get(metrics_handler::metrics))
        .route(DATA_ROUTE, get(simulation_handler::get_data))
        .route(LOAD_ROUTE, get(simulation_handler::simulate_load));

    with_observability(router, state)
}

/// 为路由挂载可观测性中间件并注入状态
///
/// 由外到内依次为：请求指标、兜底错误处理、请求日志。
/// 中间件同样作用于未匹配路由的 404 兜底处理。
pub fn with_observability(router: Router<AppState>, state: AppState) -> Router {
    router
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(middleware::from_fn(error_middleware))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            metrics_middleware,
        ))
        .with_state(state)
}
