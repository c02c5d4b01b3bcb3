use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod calendar;
pub mod config;
pub mod error;
pub mod fetch;
pub mod protocol;
pub mod route;
pub mod schedule;
pub mod session;
pub mod toast;
pub mod validation;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const BEARER_PREFIX: &str = "Bearer ";
pub const AVATAR_FIELD: &str = "avatar";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 已登录用户的资料
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// 预约另一方（客户或服务提供者）的展示信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentParty {
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "user")]
    pub counterpart: AppointmentParty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthAvailabilityItem {
    pub day: u32,
    pub available: bool,
}

/// 认证会话
///
/// token 与 user 总是同时存在，`Option<Session>` 表达"无会话"。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    /// 生成 Authorization 头的值
    pub fn bearer(&self) -> String {
        format!("{}{}", BEARER_PREFIX, self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appointment_reads_counterpart_from_user_key() {
        let json = r#"{
            "id": "a1",
            "date": "2024-01-01T08:00:00Z",
            "user": { "name": "Sheila Viana", "avatar_url": null }
        }"#;
        let appointment: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appointment.counterpart.name, "Sheila Viana");
        assert_eq!(appointment.counterpart.avatar_url, None);
    }

    #[test]
    fn bearer_prefixes_token() {
        let user = User {
            id: "1".into(),
            name: "Ana".into(),
            email: "ana@example.com".into(),
            avatar_url: None,
        };
        assert_eq!(Session::new("abc", user).bearer(), "Bearer abc");
    }
}
