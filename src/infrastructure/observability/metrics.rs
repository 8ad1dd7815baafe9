// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Gauge};
use metrics_exporter_prometheus::{
    BuildError, Matcher, PrometheusBuilder, PrometheusHandle, PrometheusRecorder,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::debug;

use super::process::ProcessCollector;

pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";
pub const HTTP_ACTIVE_CONNECTIONS: &str = "http_active_connections";

/// 请求耗时直方图的桶边界（秒）
pub const DURATION_BUCKETS: [f64; 12] = [
    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Prometheus 文本暴露格式的内容类型
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// 指标系统错误类型
#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("failed to build Prometheus recorder: {0}")]
    Build(#[from] BuildError),
}

/// HTTP 指标注册表
///
/// 持有独立的 Prometheus recorder，不安装为全局 recorder，
/// 通过应用状态注入到中间件与处理器中。
pub struct HttpMetrics {
    recorder: PrometheusRecorder,
    handle: PrometheusHandle,
    active_connections: Gauge,
    process: ProcessCollector,
}

impl HttpMetrics {
    /// 创建指标注册表并登记所有指标
    pub fn new() -> Result<Self, MetricsError> {
        let recorder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Full(HTTP_REQUEST_DURATION_SECONDS.to_string()),
                &DURATION_BUCKETS,
            )?
            .build_recorder();
        let handle = recorder.handle();

        let active_connections = metrics::with_local_recorder(&recorder, || {
            describe_counter!(HTTP_REQUESTS_TOTAL, "Total number of HTTP requests");
            describe_histogram!(
                HTTP_REQUEST_DURATION_SECONDS,
                "Duration of HTTP requests in seconds"
            );
            describe_gauge!(HTTP_ACTIVE_CONNECTIONS, "Number of active HTTP connections");

            let active = gauge!(HTTP_ACTIVE_CONNECTIONS);
            active.set(0.0);
            active
        });
        let process = ProcessCollector::register(&recorder);

        Ok(Self {
            recorder,
            handle,
            active_connections,
            process,
        })
    }

    /// 预先登记已知路由的请求计数与耗时序列
    ///
    /// 序列以零值出现在首次抓取中；重复登记不会改变已有取值。
    pub fn register_routes(&self, method: &str, routes: &[&str]) {
        metrics::with_local_recorder(&self.recorder, || {
            for route in routes {
                counter!(
                    HTTP_REQUESTS_TOTAL,
                    "method" => method.to_owned(),
                    "status" => "200",
                    "route" => route.to_string()
                )
                .increment(0);
                let _ = histogram!(
                    HTTP_REQUEST_DURATION_SECONDS,
                    "method" => method.to_owned(),
                    "route" => route.to_string()
                );
            }
        });
    }

    /// 记录一个进行中的请求，返回的守卫在释放时恢复计数
    pub fn track_connection(&self) -> ConnectionGuard {
        self.active_connections.increment(1.0);
        ConnectionGuard {
            gauge: self.active_connections.clone(),
        }
    }

    /// 记录一次已完成的请求
    pub fn record_request(&self, method: &str, status: u16, route: &str, elapsed: Duration) {
        metrics::with_local_recorder(&self.recorder, || {
            counter!(
                HTTP_REQUESTS_TOTAL,
                "method" => method.to_owned(),
                "status" => status.to_string(),
                "route" => route.to_owned()
            )
            .increment(1);
            histogram!(
                HTTP_REQUEST_DURATION_SECONDS,
                "method" => method.to_owned(),
                "route" => route.to_owned()
            )
            .record(elapsed.as_secs_f64());
        });
    }

    /// 刷新进程指标并渲染 Prometheus 文本
    pub fn render(&self) -> String {
        self.process.collect();
        self.handle.render()
    }

    /// 启动后台维护任务
    ///
    /// 定期执行 exporter 维护并刷新进程指标
    pub fn spawn_upkeep(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let metrics = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                metrics.handle.run_upkeep();
                metrics.process.collect();
                debug!("Metrics upkeep completed");
            }
        })
    }
}

/// 活跃连接守卫
///
/// 创建时计数已加一，释放时减一；无论请求成功、失败、panic 还是被客户端中断，
/// 都只会减一次。
#[must_use = "dropping the guard immediately decrements the active connection gauge"]
pub struct ConnectionGuard {
    gauge: Gauge,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.gauge.decrement(1.0);
    }
}
