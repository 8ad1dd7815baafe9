// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型
pub mod models;

/// 领域服务
///
/// 包含合成负载与错误模拟
pub mod services;
