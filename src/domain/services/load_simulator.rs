// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use rand::Rng;
use std::time::{Duration, Instant};

use crate::config::settings::SimulationSettings;
use crate::domain::models::data_point::DataPoint;
use crate::utils::time::iso_timestamp;

/// 合成负载模拟器
///
/// 生成随机延迟、随机失败、样本数据集以及 CPU 忙等待。
/// 随机数来自线程本地 RNG，每次调用即取即用，不跨越 await 点持有。
#[derive(Debug, Clone)]
pub struct LoadSimulator {
    error_rate: f64,
    max_delay: Duration,
    load_duration: Duration,
    dataset_size: usize,
}

impl LoadSimulator {
    pub fn new(settings: &SimulationSettings) -> Self {
        Self {
            error_rate: settings.error_rate.clamp(0.0, 1.0),
            max_delay: Duration::from_millis(settings.max_delay_ms),
            load_duration: Duration::from_millis(settings.load_duration_ms),
            dataset_size: settings.dataset_size,
        }
    }

    /// 在 `[0, max_delay)` 内均匀取一个延迟
    pub fn random_delay(&self) -> Duration {
        if self.max_delay.is_zero() {
            return Duration::ZERO;
        }
        let secs = rand::rng().random_range(0.0..self.max_delay.as_secs_f64());
        Duration::from_secs_f64(secs)
    }

    /// 按配置的失败概率独立抽样一次
    pub fn should_fail(&self) -> bool {
        rand::rng().random_bool(self.error_rate)
    }

    /// 生成 id 从 0 开始连续递增的样本数据，取值范围 `[0, 100)`
    pub fn generate_dataset(&self) -> Vec<DataPoint> {
        let mut rng = rand::rng();
        (0..self.dataset_size)
            .map(|id| DataPoint {
                id,
                value: rng.random::<f64>() * 100.0,
                timestamp: iso_timestamp(),
            })
            .collect()
    }

    /// 在当前线程上忙等待配置的时长
    ///
    /// 有意不让出线程：用于向可观测性系统演示线程饥饿，
    /// 期间同一工作线程上的其他请求都会被阻塞。
    pub fn burn_cpu(&self) -> Duration {
        let start = Instant::now();
        while start.elapsed() < self.load_duration {
            std::hint::spin_loop();
        }
        start.elapsed()
    }

    pub fn load_duration(&self) -> Duration {
        self.load_duration
    }
}
