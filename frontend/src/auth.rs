//! 认证模块
//!
//! 管理会话状态，与路由系统解耦。
//! 路由服务通过注入的认证信号来检查认证状态。

use crate::api::GoBarberApi;
use crate::web::BrowserStorage;
use gobarber_shared::config::AppConfig;
use gobarber_shared::error::ApiResult;
use gobarber_shared::protocol::SignInRequest;
use gobarber_shared::session::SessionContext;
use gobarber_shared::User;
use leptos::prelude::*;

pub type BrowserSession = SessionContext<BrowserStorage>;

/// 认证上下文
///
/// 通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 会话状态
    pub state: RwSignal<BrowserSession>,
    /// API 客户端
    api: StoredValue<GoBarberApi>,
}

impl AuthContext {
    /// 创建认证上下文并从 LocalStorage 恢复会话
    pub fn new(config: &AppConfig) -> Self {
        let session = SessionContext::initialize(BrowserStorage, config.session_keys());
        match session.current_user() {
            Some(user) => log_info!("[Auth] Session restored for {}", user.email),
            None => log_info!("[Auth] No stored session"),
        }
        Self {
            state: RwSignal::new(session),
            api: StoredValue::new(GoBarberApi::new(config.api_url.clone())),
        }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.is_authenticated()))
    }

    /// 当前用户（响应式）
    pub fn user(&self) -> Signal<Option<User>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.current_user().cloned()))
    }

    pub fn api(&self) -> GoBarberApi {
        self.api.get_value()
    }

    /// 当前请求应附加的 Authorization 头
    pub fn authorization(&self) -> Option<String> {
        self.state.with_untracked(|s| s.authorization())
    }
}

/// 从 Context 获取认证上下文
///
/// 未挂载 provider 属于装配错误，直接 panic。
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 登录
///
/// 在会话副本上完成凭据交换，成功后整体替换；失败时原会话不变。
pub async fn sign_in(ctx: &AuthContext, request: SignInRequest) -> ApiResult<()> {
    let api = ctx.api();
    let mut session = ctx.state.get_untracked();
    let email = request.email.clone();
    session.sign_in(&api, &request).await?;
    ctx.state.set(session);
    log_info!("[Auth] Signed in as {}", email);
    Ok(())
}

/// 注销并清除状态
///
/// 导航将由路由服务的认证状态监听自动处理。
pub fn sign_out(ctx: &AuthContext) {
    let result = ctx.state.try_update(|s| s.sign_out()).unwrap_or(Ok(()));
    match result {
        Ok(()) => log_info!("[Auth] Signed out"),
        Err(e) => log_warn!("[Auth] Signed out, but stored session was not cleared: {}", e),
    }
}

/// 用资料接口返回的用户替换当前用户
///
/// 用户记录写入失败时返回错误，内存中的用户保持不变。
pub fn update_user(ctx: &AuthContext, user: User) -> ApiResult<()> {
    let updated = ctx.state.try_update(|s| s.update_user(user)).unwrap_or(Ok(false))?;
    if !updated {
        log_warn!("[Auth] Ignored user update without a session");
    }
    Ok(())
}
