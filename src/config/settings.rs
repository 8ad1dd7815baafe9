// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use validator::Validate;

/// 监听端口环境变量
pub const PORT_VAR: &str = "PORT";
/// 运行环境名称环境变量
pub const ENVIRONMENT_VAR: &str = "NODE_ENV";

/// 应用程序配置设置
///
/// 包含服务器、应用信息、日志、指标和负载模拟等所有配置项
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 应用信息配置
    pub app: AppSettings,
    /// 日志配置
    pub logging: LoggingSettings,
    /// 指标配置
    #[validate(nested)]
    pub metrics: MetricsSettings,
    /// 负载模拟配置
    #[validate(nested)]
    pub simulation: SimulationSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// 应用信息配置设置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppSettings {
    /// 根路径返回的消息
    pub name: String,
    /// 应用版本号
    pub version: String,
    /// 运行环境名称，仅用于启动日志
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "Sample Application for Observability Stack".to_string(),
            version: "1.0.0".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// 日志配置设置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// 未设置 RUST_LOG 时使用的默认过滤级别
    pub level: String,
    /// 日志文件路径，为空时只输出到控制台
    pub file_path: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: Some("/var/log/sample-app/app.log".to_string()),
        }
    }
}

impl LoggingSettings {
    /// 返回有效的日志文件路径
    pub fn file_path(&self) -> Option<&str> {
        self.file_path.as_deref().filter(|path| !path.trim().is_empty())
    }
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct MetricsSettings {
    /// 未匹配路由是否统一标记为 `unmatched`
    pub collapse_unmatched_routes: bool,
    /// 后台维护任务间隔（秒）
    #[validate(range(min = 1))]
    pub upkeep_interval_secs: u64,
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self {
            collapse_unmatched_routes: false,
            upkeep_interval_secs: 5,
        }
    }
}

impl MetricsSettings {
    pub fn upkeep_interval(&self) -> Duration {
        Duration::from_secs(self.upkeep_interval_secs)
    }
}

/// 负载模拟配置设置
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct SimulationSettings {
    /// `/api/data` 的失败概率
    #[validate(range(min = 0.0, max = 1.0))]
    pub error_rate: f64,
    /// `/api/data` 随机延迟上限（毫秒，不含）
    pub max_delay_ms: u64,
    /// `/api/load` 忙等待时长（毫秒）
    pub load_duration_ms: u64,
    /// `/api/data` 返回的数据条数
    #[validate(range(min = 1))]
    pub dataset_size: usize,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            error_rate: 0.05,
            max_delay_ms: 100,
            load_duration_ms: 100,
            dataset_size: 10,
        }
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从进程环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars().collect())
    }

    /// 从给定的环境变量集合加载配置
    ///
    /// 加载顺序（后者覆盖前者）：内置默认值、`config/default`、
    /// `config/{environment}`、`SAMPLE_APP__*` 变量、`PORT` 与 `NODE_ENV`。
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let environment = vars
            .get(ENVIRONMENT_VAR)
            .cloned()
            .unwrap_or_else(|| AppSettings::default().environment);
        let port = vars.get(PORT_VAR).cloned();

        let settings: Settings = Config::builder()
            // Start with default settings
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            .add_source(
                Environment::with_prefix("SAMPLE_APP")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(vars.clone())),
            )
            .set_override_option("server.port", port)?
            .set_override_option("app.environment", vars.get(ENVIRONMENT_VAR).cloned())?
            .build()?
            .try_deserialize()?;

        settings
            .validate()
            .map_err(|e| ConfigError::Message(format!("Invalid configuration: {}", e)))?;
        Ok(settings)
    }
}
