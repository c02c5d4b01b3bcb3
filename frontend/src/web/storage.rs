//! LocalStorage 封装模块
//!
//! 以原始字符串读写 `window.localStorage`，供会话上下文持久化 token 与用户记录。

use gloo_storage::{LocalStorage, Storage};
use gobarber_shared::error::{ApiError, ApiResult};
use gobarber_shared::session::SessionStore;

/// 浏览器本地存储
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl SessionStore for BrowserStorage {
    /// 键不存在或发生错误时返回 `None`
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    /// 配额耗尽或隐私模式下 `setItem` 会抛出异常
    fn set(&self, key: &str, value: &str) -> ApiResult<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| ApiError::storage(format!("localStorage.setItem({}): {:?}", key, e)))
    }

    fn delete(&self, key: &str) -> ApiResult<()> {
        LocalStorage::raw()
            .remove_item(key)
            .map_err(|e| ApiError::storage(format!("localStorage.removeItem({}): {:?}", key, e)))
    }
}
