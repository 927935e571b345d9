//! 运行时配置
//!
//! 前端在编译期读取环境变量，未设置时使用默认值。

use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "http://localhost:3333";
const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_NOTICE_TIMEOUT: Duration = Duration::from_secs(3);

const ENV_API_URL: &str = "LOUVOR_API_URL";
const ENV_LOG: &str = "LOUVOR_LOG";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// 后端地址，不含结尾的 `/`
    pub api_base_url: String,
    /// tracing 过滤指令，如 `info` 或 `louvor_frontend=debug`
    pub log_filter: String,
    /// 提示消息的显示时长
    pub notice_timeout: Duration,
}

impl AppConfig {
    /// 从编译期环境变量构建
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| {
            let value = match key {
                ENV_API_URL => option_env!("LOUVOR_API_URL"),
                ENV_LOG => option_env!("LOUVOR_LOG"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    /// 通过查找函数构建，空值视为未设置
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            api_base_url: read(ENV_API_URL, DEFAULT_API_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            log_filter: read(ENV_LOG, DEFAULT_LOG_FILTER),
            notice_timeout: DEFAULT_NOTICE_TIMEOUT,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:3333");
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.notice_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_overrides_trim_trailing_slash() {
        let config = AppConfig::from_lookup(|key| match key {
            "LOUVOR_API_URL" => Some("https://api.igreja.org/".to_string()),
            "LOUVOR_LOG" => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.api_base_url, "https://api.igreja.org");
        assert_eq!(config.log_filter, "info");
    }
}
