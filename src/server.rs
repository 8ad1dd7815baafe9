// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;
use std::future::IntoFuture;
use std::io;
use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::settings::Settings;
use crate::presentation::{routes, state::AppState};

/// 触发退出的进程信号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownSignal::Interrupt => f.write_str("SIGINT"),
            ShutdownSignal::Terminate => f.write_str("SIGTERM"),
        }
    }
}

/// 启动 HTTP 服务直到收到退出信号
///
/// 收到 SIGINT/SIGTERM 后记录一条日志并立即返回，
/// 不等待进行中的请求完成。
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let state = AppState::new(settings)?;
    let _upkeep = state
        .metrics
        .spawn_upkeep(state.settings.metrics.upkeep_interval());

    let addr = format!("{}:{}", state.settings.server.host, state.settings.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!(
        port = state.settings.server.port,
        environment = %state.settings.app.environment,
        "Sample application started"
    );

    let app = routes::routes(state);
    let server =
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).into_future();

    tokio::select! {
        result = server => result?,
        signal = shutdown_signal() => {
            let signal = signal?;
            info!("Received {}, shutting down gracefully", signal);
        }
    }

    Ok(())
}

/// 等待第一个退出信号
pub async fn shutdown_signal() -> io::Result<ShutdownSignal> {
    #[cfg(unix)]
    let signal = {
        use tokio::signal::unix::{signal, SignalKind};

        let mut interrupt = signal(SignalKind::interrupt())?;
        let mut terminate = signal(SignalKind::terminate())?;

        tokio::select! {
            _ = interrupt.recv() => ShutdownSignal::Interrupt,
            _ = terminate.recv() => ShutdownSignal::Terminate,
        }
    };

    #[cfg(not(unix))]
    let signal = {
        tokio::signal::ctrl_c().await?;
        ShutdownSignal::Interrupt
    };

    Ok(signal)
}
