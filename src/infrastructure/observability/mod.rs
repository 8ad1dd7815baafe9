// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 可观测性模块
///
/// 提供 HTTP 请求指标与进程默认指标的采集与暴露
pub mod metrics;
pub mod process;
