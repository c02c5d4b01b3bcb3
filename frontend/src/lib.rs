//! GoBarber 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `gobarber_shared`: 领域模型、会话、派生逻辑（平台无关）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth` / `toast`: 响应式上下文
//! - `components`: UI 组件层

// =========================================================
// 跨平台日志宏
// =========================================================
// leptos::logging 在 wasm 上写入浏览器控制台，原生平台写入 stdout/stderr

macro_rules! log_info {
    ($($t:tt)*) => (leptos::logging::log!($($t)*))
}

macro_rules! log_warn {
    ($($t:tt)*) => (leptos::logging::warn!($($t)*))
}

macro_rules! log_error {
    ($($t:tt)*) => (leptos::logging::error!($($t)*))
}

mod api;
mod auth;
mod toast;
mod components {
    pub mod calendar;
    pub mod dashboard;
    pub mod forgot_password;
    pub mod form;
    pub mod icons;
    pub mod profile;
    pub mod reset_password;
    pub mod sign_in;
    pub mod sign_up;
    pub mod toast_container;
}

use crate::auth::AuthContext;
use crate::components::dashboard::DashboardPage;
use crate::components::forgot_password::ForgotPasswordPage;
use crate::components::profile::ProfilePage;
use crate::components::reset_password::ResetPasswordPage;
use crate::components::sign_in::SignInPage;
use crate::components::sign_up::SignUpPage;
use crate::components::toast_container::ToastContainer;
use crate::toast::ToastContext;

use gobarber_shared::config::AppConfig;
use gobarber_shared::route::AppRoute;
use leptos::prelude::*;

// 浏览器 API 封装：路由引擎与本地存储
pub(crate) mod web {
    pub mod router;
    mod storage;

    pub use storage::BrowserStorage;
}

use web::router::{Link, Router, RouterOutlet};

/// 构建期配置
fn app_config() -> AppConfig {
    AppConfig::new(
        option_env!("GOBARBER_API_URL"),
        option_env!("GOBARBER_STORAGE_NAMESPACE"),
    )
}

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::SignIn => view! { <SignInPage /> }.into_any(),
        AppRoute::SignUp => view! { <SignUpPage /> }.into_any(),
        AppRoute::ForgotPassword => view! { <ForgotPasswordPage /> }.into_any(),
        AppRoute::ResetPassword => view! { <ResetPasswordPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Página não encontrada"</p>
                    <Link to="/" class="link link-primary mt-4 inline-block">"Voltar ao início"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = app_config();

    // 1. 创建会话上下文（从 LocalStorage 恢复）
    let auth_ctx = AuthContext::new(&config);
    provide_context(auth_ctx);

    // 2. 创建 toast 队列
    provide_context(ToastContext::new());

    // 3. 获取认证状态信号，用于注入路由服务
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        // 4. 路由器组件：注入认证信号实现守卫
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
        <ToastContainer />
    }
}
