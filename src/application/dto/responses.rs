// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use crate::domain::models::data_point::DataPoint;

/// 对外统一的错误消息
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// 根路径响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceInfoResponse {
    pub message: String,
    pub timestamp: String,
    pub version: String,
}

/// 健康检查响应
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    /// 进程运行时长（秒）
    pub uptime: f64,
}

/// 样本数据响应
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse {
    pub data: Vec<DataPoint>,
}

/// 简单消息响应
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// 错误响应
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn internal() -> Self {
        Self {
            error: INTERNAL_SERVER_ERROR.to_string(),
        }
    }
}
