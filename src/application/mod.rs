// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据传输对象
///
/// 定义 HTTP 接口的响应结构
pub mod dto;
