// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{ConnectInfo, Request},
    http::header::USER_AGENT,
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use tracing::{field, info};

use super::request_url;

/// 请求日志中间件
///
/// 每个请求记录一条 info 日志，包含方法、URL、User-Agent 和客户端 IP。
/// 不影响请求处理流程。
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok());
    let ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    info!(
        method = %req.method(),
        url = request_url(req.uri()),
        user_agent,
        ip = ip.map(field::display),
        "HTTP request"
    );

    next.run(req).await
}
