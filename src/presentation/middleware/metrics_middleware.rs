// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use crate::presentation::state::AppState;

/// 未匹配路由的统一标签值
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// 请求指标中间件
///
/// 最外层中间件。进入时活跃连接数加一并记录开始时间；
/// 完成时按 {method, status, route} 计数，按 {method, route} 记录耗时，
/// 连接守卫在函数返回或被取消时释放。
///
/// # 参数
///
/// * `state` - 应用状态
/// * `req` - HTTP请求
/// * `next` - 下一个中间件
pub async fn metrics_middleware(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let _connection = state.metrics.track_connection();
    let start = Instant::now();

    let method = req.method().clone();
    let route = route_label(&req, state.settings.metrics.collapse_unmatched_routes);

    let response = next.run(req).await;

    state.metrics.record_request(
        method.as_str(),
        response.status().as_u16(),
        &route,
        start.elapsed(),
    );

    response
}

/// 路由标签：优先使用匹配到的路由模板，否则使用原始路径
fn route_label(req: &Request, collapse_unmatched: bool) -> String {
    match req.extensions().get::<MatchedPath>() {
        Some(path) => path.as_str().to_owned(),
        // Raw paths are user input; collapsing keeps label cardinality bounded
        None if collapse_unmatched => UNMATCHED_ROUTE.to_owned(),
        None => req.uri().path().to_owned(),
    }
}
