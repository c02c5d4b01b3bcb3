//! 表单校验模块
//!
//! 表单结构体通过 `validator` 派生校验规则，校验结果统一转换为
//! `FieldErrors`（字段名 -> 消息列表），由页面映射回对应输入框。

use std::collections::BTreeMap;

use validator::{Validate, ValidationErrors};

use crate::protocol::{
    ForgotPasswordRequest, ResetPasswordRequest, SignInRequest, SignUpRequest,
    UpdateProfileRequest,
};

pub const MSG_REQUIRED: &str = "Campo obrigatório";
pub const MSG_EMAIL: &str = "Digite um e-mail válido";
pub const MSG_PASSWORD_MIN: &str = "No mínimo 6 dígitos";
pub const MSG_CONFIRMATION: &str = "Confirmação precisa ser igual ao campo senha";

// =========================================================
// FieldErrors
// =========================================================

/// 字段级校验错误
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// 字段的全部消息
    pub fn messages(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 字段的首条消息（用于输入框下方展示）
    pub fn first(&self, field: &str) -> Option<&str> {
        self.messages(field).first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 出错字段数量
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.fields {
            self.fields.entry(field).or_default().extend(messages);
        }
    }

    /// 无错误时返回 `Ok(value)`
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, list) in errors.field_errors() {
            for error in list.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                out.push(field.to_string(), message);
            }
        }
        out
    }
}

fn run_schema<T: Validate>(form: &T) -> FieldErrors {
    match form.validate() {
        Ok(()) => FieldErrors::new(),
        Err(errors) => errors.into(),
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

// =========================================================
// 表单定义
// =========================================================

#[derive(Debug, Clone, Default, Validate)]
pub struct SignInForm {
    #[validate(length(min = 1, message = "Campo obrigatório"), email(message = "Digite um e-mail válido"))]
    pub email: String,
    #[validate(length(min = 1, message = "Campo obrigatório"))]
    pub password: String,
}

impl SignInForm {
    /// 先去除邮箱首尾空白再校验
    pub fn check(&self) -> Result<SignInRequest, FieldErrors> {
        let form = Self {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        };
        run_schema(&form).into_result(SignInRequest {
            email: form.email,
            password: form.password,
        })
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct SignUpForm {
    #[validate(length(min = 1, message = "Campo obrigatório"))]
    pub name: String,
    #[validate(length(min = 1, message = "Campo obrigatório"), email(message = "Digite um e-mail válido"))]
    pub email: String,
    #[validate(length(min = 6, message = "No mínimo 6 dígitos"))]
    pub password: String,
}

impl SignUpForm {
    pub fn check(&self) -> Result<SignUpRequest, FieldErrors> {
        let form = Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        };
        run_schema(&form).into_result(SignUpRequest {
            name: form.name,
            email: form.email,
            password: form.password,
        })
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct ForgotPasswordForm {
    #[validate(length(min = 1, message = "Campo obrigatório"), email(message = "Digite um e-mail válido"))]
    pub email: String,
}

impl ForgotPasswordForm {
    pub fn check(&self) -> Result<ForgotPasswordRequest, FieldErrors> {
        let email = self.email.trim().to_string();
        run_schema(&Self { email: email.clone() }).into_result(ForgotPasswordRequest { email })
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct ResetPasswordForm {
    #[validate(length(min = 1, message = "Campo obrigatório"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Confirmação precisa ser igual ao campo senha"))]
    pub password_confirmation: String,
}

impl ResetPasswordForm {
    /// 校验表单；字段通过后再检查链接中的 token
    ///
    /// token 缺失不属于字段错误，由调用方以 toast 提示。
    pub fn check(&self) -> Result<ResetPasswordDraft, FieldErrors> {
        run_schema(self).into_result(ResetPasswordDraft {
            new_password: self.password.clone(),
            new_password_confirmation: self.password_confirmation.clone(),
        })
    }
}

/// 已通过字段校验、尚未绑定 token 的重置请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetPasswordDraft {
    pub new_password: String,
    pub new_password_confirmation: String,
}

impl ResetPasswordDraft {
    pub fn with_token(self, token: Option<String>) -> Option<ResetPasswordRequest> {
        let token = token.filter(|t| !t.is_empty())?;
        Some(ResetPasswordRequest {
            new_password: self.new_password,
            new_password_confirmation: self.new_password_confirmation,
            token,
        })
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct ProfileForm {
    #[validate(length(min = 1, message = "Campo obrigatório"))]
    pub name: String,
    #[validate(length(min = 1, message = "Campo obrigatório"), email(message = "Digite um e-mail válido"))]
    pub email: String,
    pub old_password: String,
    pub password: String,
    #[validate(must_match(other = "password", message = "Confirmação precisa ser igual ao campo senha"))]
    pub password_confirmation: String,
}

impl ProfileForm {
    /// 填写了当前密码时，新密码与确认均为必填；否则只提交姓名与邮箱
    pub fn check(&self) -> Result<UpdateProfileRequest, FieldErrors> {
        let form = Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            ..self.clone()
        };
        let mut errors = run_schema(&form);

        let changing_password = !form.old_password.is_empty();
        if changing_password {
            if form.password.is_empty() {
                errors.push("password", MSG_REQUIRED);
            }
            if form.password_confirmation.is_empty() {
                errors.push("password_confirmation", MSG_REQUIRED);
            }
        }

        let request = if changing_password {
            UpdateProfileRequest {
                old_password: non_empty(&form.old_password),
                new_password: non_empty(&form.password),
                new_password_confirmation: non_empty(&form.password_confirmation),
                name: form.name,
                email: form.email,
            }
        } else {
            UpdateProfileRequest {
                name: form.name,
                email: form.email,
                old_password: None,
                new_password: None,
                new_password_confirmation: None,
            }
        };

        errors.into_result(request)
    }
}
