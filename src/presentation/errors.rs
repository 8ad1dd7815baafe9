// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::backtrace::BacktraceStatus;

use crate::application::dto::responses::ErrorResponse;

/// 应用错误类型
///
/// 封装处理器中未预期的错误。对客户端只返回通用的 500 响应，
/// 错误详情通过 [`FaultReport`] 交给兜底错误中间件记录。
#[derive(Debug)]
pub struct AppError(anyhow::Error);

/// 附加在响应扩展中的错误详情
#[derive(Debug, Clone)]
pub struct FaultReport {
    pub message: String,
    pub stack: Option<String>,
}

impl From<&anyhow::Error> for FaultReport {
    fn from(err: &anyhow::Error) -> Self {
        let backtrace = err.backtrace();
        let stack = match backtrace.status() {
            BacktraceStatus::Captured => Some(backtrace.to_string()),
            _ => None,
        };
        Self {
            message: format!("{:#}", err),
            stack,
        }
    }
}

/// 通用的 500 响应
pub fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::internal()),
    )
        .into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut response = internal_error_response();
        response
            .extensions_mut()
            .insert(FaultReport::from(&self.0));
        response
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
