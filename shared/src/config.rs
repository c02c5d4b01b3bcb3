//! 运行配置
//!
//! 前端在编译期通过 `option_env!` 读取 `GOBARBER_API_URL` 与
//! `GOBARBER_STORAGE_NAMESPACE`，读不到就使用默认值。

use crate::session::SessionKeys;

/// 这些是默认值，构建时未设置对应环境变量则使用这些值
pub const DEFAULT_API_URL: &str = "http://localhost:3333";
pub const DEFAULT_STORAGE_NAMESPACE: &str = "@GoBarber";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// API 根地址，不含末尾的 `/`
    pub api_url: String,
    /// LocalStorage 键的命名空间前缀
    pub storage_namespace: String,
}

impl AppConfig {
    pub fn new(api_url: Option<&str>, storage_namespace: Option<&str>) -> Self {
        let api_url = api_url
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();
        let storage_namespace = storage_namespace
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_STORAGE_NAMESPACE)
            .to_string();
        Self {
            api_url,
            storage_namespace,
        }
    }

    pub fn session_keys(&self) -> SessionKeys {
        SessionKeys::new(&self.storage_namespace)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_defaults() {
        let config = AppConfig::new(None, Some("  "));
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.storage_namespace, DEFAULT_STORAGE_NAMESPACE);
    }

    #[test]
    fn overrides_trim_trailing_slash() {
        let config = AppConfig::new(Some("https://api.gobarber.dev/"), Some("@Test"));
        assert_eq!(config.api_url, "https://api.gobarber.dev");
        assert_eq!(config.session_keys().token, "@Test:token");
    }
}
