// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{SecondsFormat, Utc};

/// 当前 UTC 时间的 ISO-8601 字符串，毫秒精度，例如 `2025-01-15T08:30:00.123Z`
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
