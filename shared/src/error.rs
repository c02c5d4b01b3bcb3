use std::fmt;

use crate::validation::FieldErrors;

// =========================================================
// 错误状态枚举
// =========================================================

/// 远程 API 调用失败的分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorStatus {
    /// 401 / 403: 凭据无效或会话过期
    Unauthorized,
    /// 4xx: 请求被服务端拒绝
    Rejected,
    /// 5xx: 服务端内部错误
    Server,
    /// 请求未能送达（断网、CORS、DNS 等）
    Network,
    /// 响应体无法解析
    Decode,
    /// 重置密码链接中缺少 token
    MissingToken,
    /// 本地持久化存储读写失败
    Storage,
}

impl ApiErrorStatus {
    /// 根据 HTTP 状态码归类
    pub fn from_status_code(code: u16) -> Self {
        match code {
            401 | 403 => ApiErrorStatus::Unauthorized,
            400..=499 => ApiErrorStatus::Rejected,
            _ => ApiErrorStatus::Server,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiErrorStatus::Unauthorized => "UNAUTHORIZED",
            ApiErrorStatus::Rejected => "REQUEST_REJECTED",
            ApiErrorStatus::Server => "SERVER_ERROR",
            ApiErrorStatus::Network => "NETWORK_ERROR",
            ApiErrorStatus::Decode => "DECODE_ERROR",
            ApiErrorStatus::MissingToken => "MISSING_TOKEN",
            ApiErrorStatus::Storage => "STORAGE_ERROR",
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// API 调用错误
///
/// `message` 仅用于日志，不直接展示给用户。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: ApiErrorStatus,
    pub message: String,
}

impl ApiError {
    pub fn new(status: ApiErrorStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    // --- Convenience constructors ---

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ApiErrorStatus::Unauthorized, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorStatus::Network, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorStatus::Decode, message)
    }

    pub fn missing_token() -> Self {
        Self::new(ApiErrorStatus::MissingToken, "reset link carries no token")
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ApiErrorStatus::Storage, message)
    }

    /// 由非 2xx 响应构造
    pub fn from_response(code: u16, body: impl Into<String>) -> Self {
        Self::new(
            ApiErrorStatus::from_status_code(code),
            format!("HTTP {}: {}", code, body.into()),
        )
    }

    pub fn error_code(&self) -> &'static str {
        self.status.error_code()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

// =========================================================
// 表单提交错误
// =========================================================

/// 表单提交的失败结果
///
/// - `Invalid`: 校验失败，映射回表单字段，不弹 toast
/// - `Api`: 远程调用失败，转换为通用错误 toast
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitError {
    Invalid(FieldErrors),
    Api(ApiError),
}

impl From<FieldErrors> for SubmitError {
    fn from(errors: FieldErrors) -> Self {
        SubmitError::Invalid(errors)
    }
}

impl From<ApiError> for SubmitError {
    fn from(error: ApiError) -> Self {
        SubmitError::Api(error)
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Invalid(errors) => write!(f, "invalid form: {} field(s)", errors.len()),
            SubmitError::Api(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SubmitError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_are_classified() {
        assert_eq!(ApiErrorStatus::from_status_code(401), ApiErrorStatus::Unauthorized);
        assert_eq!(ApiErrorStatus::from_status_code(403), ApiErrorStatus::Unauthorized);
        assert_eq!(ApiErrorStatus::from_status_code(400), ApiErrorStatus::Rejected);
        assert_eq!(ApiErrorStatus::from_status_code(422), ApiErrorStatus::Rejected);
        assert_eq!(ApiErrorStatus::from_status_code(500), ApiErrorStatus::Server);
    }

    #[test]
    fn display_includes_code_and_message() {
        let err = ApiError::from_response(401, "bad credentials");
        assert_eq!(err.to_string(), "[UNAUTHORIZED] HTTP 401: bad credentials");
    }

    #[test]
    fn submit_error_converts_from_both_sources() {
        let invalid: SubmitError = FieldErrors::default().into();
        assert!(matches!(invalid, SubmitError::Invalid(_)));

        let api: SubmitError = ApiError::network("offline").into();
        assert!(matches!(api, SubmitError::Api(e) if e.status == ApiErrorStatus::Network));
    }
}
