//! 会话上下文
//!
//! 持有 `{token, user}`，负责：
//! - 启动时从持久化存储恢复
//! - 登录时持久化并更新内存状态
//! - 登出时清除两项持久化记录
//!
//! 不修改任何共享 HTTP 客户端；调用方通过 `authorization()` 为每个请求附加凭据。

use async_trait::async_trait;

use crate::error::{ApiError, ApiResult};
use crate::protocol::{SessionResponse, SignInRequest};
use crate::{Session, User};

// =========================================================
// 存储与网关抽象
// =========================================================

/// 持久化键值存储（浏览器 LocalStorage 或测试替身）
///
/// 写入与删除失败以 `ApiErrorStatus::Storage` 返回。
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> ApiResult<()>;
    fn delete(&self, key: &str) -> ApiResult<()>;
}

/// 凭据交换
#[async_trait(?Send)]
pub trait SessionGateway {
    async fn create_session(&self, request: &SignInRequest) -> ApiResult<SessionResponse>;
}

/// 会话在存储中的两个键
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKeys {
    pub token: String,
    pub user: String,
}

impl SessionKeys {
    pub fn new(namespace: &str) -> Self {
        Self {
            token: format!("{}:token", namespace),
            user: format!("{}:user", namespace),
        }
    }
}

// =========================================================
// SessionContext
// =========================================================

#[derive(Debug, Clone)]
pub struct SessionContext<S> {
    store: S,
    keys: SessionKeys,
    session: Option<Session>,
}

impl<S: SessionStore> SessionContext<S> {
    /// 从存储恢复会话
    ///
    /// 两项都存在且用户记录可解析时才建立会话，否则以空会话启动。
    pub fn initialize(store: S, keys: SessionKeys) -> Self {
        let session = Self::restore(&store, &keys);
        Self {
            store,
            keys,
            session,
        }
    }

    fn restore(store: &S, keys: &SessionKeys) -> Option<Session> {
        let token = store.get(&keys.token).filter(|t| !t.is_empty())?;
        let raw_user = store.get(&keys.user)?;
        let user = serde_json::from_str::<User>(&raw_user).ok()?;
        Some(Session::new(token, user))
    }

    /// 登录
    ///
    /// 凭据交换或持久化失败时，内存会话保持不变，错误原样返回给调用方。
    /// token 与用户记录只要有一项未写入，就尽力把存储恢复为原会话的内容。
    pub async fn sign_in<G>(&mut self, gateway: &G, request: &SignInRequest) -> ApiResult<&Session>
    where
        G: SessionGateway + ?Sized,
    {
        let SessionResponse { token, user } = gateway.create_session(request).await?;
        let session = Session::new(token, user);
        if let Err(e) = self.persist(&session) {
            self.restore_persisted();
            return Err(e);
        }
        Ok(self.session.insert(session))
    }

    /// 登出：清空内存会话并删除两项持久化记录，无网络请求
    ///
    /// 两项删除都会尝试；任一失败时返回第一个错误。
    pub fn sign_out(&mut self) -> ApiResult<()> {
        self.session = None;
        let token = self.store.delete(&self.keys.token);
        let user = self.store.delete(&self.keys.user);
        token.and(user)
    }

    /// 用资料更新接口返回的用户整体替换当前用户
    ///
    /// 未登录时忽略并返回 `Ok(false)`；用户记录写入失败时内存会话不变。
    pub fn update_user(&mut self, user: User) -> ApiResult<bool> {
        let Some(session) = self.session.as_mut() else {
            return Ok(false);
        };
        Self::persist_user(&self.store, &self.keys, &user)?;
        session.user = user;
        Ok(true)
    }

    fn persist(&self, session: &Session) -> ApiResult<()> {
        self.store.set(&self.keys.token, &session.token)?;
        Self::persist_user(&self.store, &self.keys, &session.user)
    }

    fn persist_user(store: &S, keys: &SessionKeys, user: &User) -> ApiResult<()> {
        let raw = serde_json::to_string(user).map_err(|e| ApiError::storage(e.to_string()))?;
        store.set(&keys.user, &raw)
    }

    /// 让存储重新与内存会话一致，失败只能忽略
    fn restore_persisted(&self) {
        let _ = match &self.session {
            Some(previous) => self.persist(previous),
            None => self
                .store
                .delete(&self.keys.token)
                .and(self.store.delete(&self.keys.user)),
        };
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// 当前请求应附加的 Authorization 头
    pub fn authorization(&self) -> Option<String> {
        self.session.as_ref().map(Session::bearer)
    }
}

#[cfg(test)]
mod tests;
