// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::Request, middleware::Next, response::Response};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tracing::error;

use super::request_url;
use crate::presentation::errors::{internal_error_response, FaultReport};

/// 兜底错误中间件
///
/// 捕获内层中间件和处理器中的 panic，以及通过 [`AppError`](crate::presentation::errors::AppError)
/// 返回的错误，统一以 error 级别记录后返回 500。自身不会再抛出错误。
pub async fn error_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let url = request_url(req.uri()).to_owned();

    match AssertUnwindSafe(next.run(req)).catch_unwind().await {
        Ok(response) => {
            if let Some(report) = response.extensions().get::<FaultReport>() {
                error!(
                    error = %report.message,
                    stack = report.stack.as_deref(),
                    url = %url,
                    method = %method,
                    "Unhandled error"
                );
            }
            response
        }
        Err(payload) => {
            error!(
                error = %panic_message(payload.as_ref()),
                url = %url,
                method = %method,
                "Unhandled error"
            );
            internal_error_response()
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
