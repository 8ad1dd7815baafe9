// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含接口响应的数据传输对象
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含样本数据模型与负载模拟服务
pub mod domain;

/// 基础设施模块
///
/// 提供指标注册表与进程指标采集
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由、处理器和中间件
pub mod presentation;

/// 服务生命周期
///
/// 监听端口、处理退出信号
pub mod server;

/// 工具模块
///
/// 提供日志初始化与时间格式化
pub mod utils;
