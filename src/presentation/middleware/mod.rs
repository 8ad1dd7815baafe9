// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 中间件模块
///
/// 提供HTTP请求处理的中间件功能
/// 包括请求指标、兜底错误处理和请求日志
pub mod error_middleware;
pub mod metrics_middleware;
pub mod request_logging_middleware;

use axum::http::Uri;

/// 请求的路径与查询串，与客户端发出的请求行一致
pub(crate) fn request_url(uri: &Uri) -> &str {
    uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/")
}
