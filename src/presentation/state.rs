// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Instant;

use crate::config::settings::Settings;
use crate::domain::services::load_simulator::LoadSimulator;
use crate::infrastructure::observability::metrics::{HttpMetrics, MetricsError};

/// 应用共享状态
///
/// 启动时构造一次，通过 `Router::with_state` 注入到路由、中间件和处理器
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub metrics: Arc<HttpMetrics>,
    pub simulator: Arc<LoadSimulator>,
    /// 进程启动时刻，用于计算运行时长
    pub started_at: Instant,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self, MetricsError> {
        Self::with_start_time(settings, Instant::now())
    }

    pub fn with_start_time(settings: Settings, started_at: Instant) -> Result<Self, MetricsError> {
        let simulator = LoadSimulator::new(&settings.simulation);
        Ok(Self {
            settings: Arc::new(settings),
            metrics: Arc::new(HttpMetrics::new()?),
            simulator: Arc::new(simulator),
            started_at,
        })
    }
}
