// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{describe_gauge, gauge, Gauge, Recorder};
use parking_lot::Mutex;
use sysinfo::{
    CpuRefreshKind, MemoryRefreshKind, Pid, ProcessRefreshKind, ProcessesToUpdate, RefreshKind,
    System,
};
use tracing::warn;

/// 进程默认指标采集器
///
/// 使用 sysinfo 读取当前进程与主机的 CPU、内存信息并写入 gauge
pub struct ProcessCollector {
    system: Mutex<System>,
    pid: Option<Pid>,
    resident_memory: Gauge,
    virtual_memory: Gauge,
    cpu_usage: Gauge,
    start_time: Gauge,
    system_cpu_usage: Gauge,
    system_memory_usage: Gauge,
}

impl ProcessCollector {
    /// 在给定 recorder 上登记进程指标
    pub fn register(recorder: &dyn Recorder) -> Self {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                warn!("Unable to resolve current pid, process metrics disabled: {}", e);
                None
            }
        };

        let system = System::new_with_specifics(
            RefreshKind::nothing()
                .with_cpu(CpuRefreshKind::nothing().with_cpu_usage())
                .with_memory(MemoryRefreshKind::nothing().with_ram()),
        );

        metrics::with_local_recorder(recorder, || {
            describe_gauge!("process_resident_memory_bytes", "Resident memory size in bytes");
            describe_gauge!("process_virtual_memory_bytes", "Virtual memory size in bytes");
            describe_gauge!("process_cpu_usage_ratio", "Process CPU usage ratio (1.0 = one core)");
            describe_gauge!(
                "process_start_time_seconds",
                "Start time of the process since unix epoch in seconds"
            );
            describe_gauge!("system_cpu_usage_ratio", "Current CPU usage ratio (0.0 to 1.0)");
            describe_gauge!("system_memory_usage_ratio", "Current memory usage ratio (0.0 to 1.0)");

            let collector = Self {
                system: Mutex::new(system),
                pid,
                resident_memory: gauge!("process_resident_memory_bytes"),
                virtual_memory: gauge!("process_virtual_memory_bytes"),
                cpu_usage: gauge!("process_cpu_usage_ratio"),
                start_time: gauge!("process_start_time_seconds"),
                system_cpu_usage: gauge!("system_cpu_usage_ratio"),
                system_memory_usage: gauge!("system_memory_usage_ratio"),
            };
            collector.collect();
            collector
        })
    }

    /// 刷新并发布最新的进程与主机指标
    pub fn collect(&self) {
        let mut sys = self.system.lock();
        sys.refresh_cpu_usage();
        sys.refresh_memory();

        self.system_cpu_usage
            .set((sys.global_cpu_usage() / 100.0) as f64);
        let total_mem = sys.total_memory();
        if total_mem > 0 {
            self.system_memory_usage
                .set(sys.used_memory() as f64 / total_mem as f64);
        }

        let Some(pid) = self.pid else {
            return;
        };
        sys.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_cpu().with_memory(),
        );
        if let Some(process) = sys.process(pid) {
            self.resident_memory.set(process.memory() as f64);
            self.virtual_memory.set(process.virtual_memory() as f64);
            self.cpu_usage.set((process.cpu_usage() / 100.0) as f64);
            self.start_time.set(process.start_time() as f64);
        }
    }
}
