//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其访问守卫。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    SignIn,
    SignUp,
    ForgotPassword,
    /// 重置密码（链接携带 `?token=`）
    ResetPassword,
    /// 预约面板 (需要认证)
    Dashboard,
    /// 个人资料 (需要认证)
    Profile,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = match path.split(['?', '#']).next() {
            Some(p) if p.len() > 1 => p.trim_end_matches('/'),
            Some(p) => p,
            None => "/",
        };
        match path {
            "" | "/" => Self::SignIn,
            "/signup" => Self::SignUp,
            "/forgot-password" => Self::ForgotPassword,
            "/reset-password" => Self::ResetPassword,
            "/dashboard" => Self::Dashboard,
            "/profile" => Self::Profile,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::SignIn => "/",
            Self::SignUp => "/signup",
            Self::ForgotPassword => "/forgot-password",
            Self::ResetPassword => "/reset-password",
            Self::Dashboard => "/dashboard",
            Self::Profile => "/profile",
            Self::NotFound => "/404",
        }
    }

    /// 该路由是否需要认证
    pub fn is_private(&self) -> bool {
        matches!(self, Self::Dashboard | Self::Profile)
    }

    /// 404 页面不受守卫约束
    pub fn is_guarded(&self) -> bool {
        !matches!(self, Self::NotFound)
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::SignIn
    }

    /// 已认证用户访问公开页时的重定向目标
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 守卫的裁决
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Render(AppRoute),
    Redirect(AppRoute),
}

impl RouteDecision {
    /// 最终应展示的路由
    pub fn target(&self) -> AppRoute {
        match self {
            RouteDecision::Render(r) | RouteDecision::Redirect(r) => *r,
        }
    }
}

/// **核心守卫逻辑**
///
/// | 私有 | 有会话 | 结果 |
/// |---|---|---|
/// | 是 | 是 | 渲染 |
/// | 是 | 否 | 重定向到 `/` |
/// | 否 | 是 | 重定向到 `/dashboard` |
/// | 否 | 否 | 渲染 |
pub fn guard(route: AppRoute, has_session: bool) -> RouteDecision {
    if !route.is_guarded() || route.is_private() == has_session {
        return RouteDecision::Render(route);
    }
    if route.is_private() {
        RouteDecision::Redirect(AppRoute::auth_failure_redirect())
    } else {
        RouteDecision::Redirect(AppRoute::auth_success_redirect())
    }
}

/// 从 `location.search`（如 `?token=abc&x=1`）中取出并解码参数值
pub fn query_param(search: &str, name: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| decode_component(value))
        .filter(|value| !value.is_empty())
}

/// `application/x-www-form-urlencoded` 解码；非法转义按原样保留
fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                (Some(hi), Some(lo)) => {
                    out.push(hi << 4 | lo);
                    i += 2;
                }
                _ => out.push(b'%'),
            },
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(b: u8) -> Option<u8> {
    (b as char).to_digit(16).map(|d| d as u8)
}
