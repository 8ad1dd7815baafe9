// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing::{warn, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::settings::LoggingSettings;

/// 初始化日志系统
///
/// 控制台始终输出 JSON 日志；配置了文件路径时额外写入日志文件。
/// 文件无法打开时仅保留控制台输出，并记录一条警告。
pub fn init_telemetry(settings: &LoggingSettings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.level.as_str()));

    let mut file_error = None;
    let file_layer = match settings.file_path() {
        Some(path) => match open_log_file(Path::new(path)) {
            Ok(file) => Some(json_layer(Mutex::new(file))),
            Err(e) => {
                file_error = Some((path.to_string(), e));
                None
            }
        },
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer(io::stdout))
        .with(file_layer)
        .try_init()?;

    if let Some((path, e)) = file_error {
        warn!(path = %path, error = %e, "Log file sink unavailable, logging to console only");
    }

    Ok(())
}

/// JSON 格式日志层，事件字段展开到顶层
pub fn json_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_span_list(false)
        .with_ansi(false)
        .with_writer(writer)
}

/// 以追加模式打开日志文件，必要时创建父目录
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
