use crate::{Appointment, MonthAvailabilityItem, User};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// Bodies of non-GET requests are sent as JSON. GET requests carry their
/// parameters through `path()` and `query()` instead.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path (or template).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// The concrete path, for endpoints with path parameters.
    fn path(&self) -> String {
        Self::PATH.to_string()
    }

    /// Query string pairs.
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// Decode a response body. An empty body reads as JSON `null`, so `()`
/// responses decode from `204 No Content`.
pub fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, serde_json::Error> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        serde_json::from_str("null")
    } else {
        serde_json::from_str(trimmed)
    }
}

// =========================================================
// Request Definitions
// =========================================================

/// Exchange credentials for a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: User,
}

impl ApiRequest for SignInRequest {
    type Response = SessionResponse;
    const PATH: &'static str = "/sessoes";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Create an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl ApiRequest for SignUpRequest {
    type Response = User;
    const PATH: &'static str = "/usuarios";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Ask for a password recovery e-mail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

impl ApiRequest for ForgotPasswordRequest {
    type Response = ();
    const PATH: &'static str = "/senhas/esqueci";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Set a new password using the token from the recovery link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
    pub new_password_confirmation: String,
    pub token: String,
}

impl ApiRequest for ResetPasswordRequest {
    type Response = ();
    const PATH: &'static str = "/senhas/resetar";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Update name/e-mail and optionally the password
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_password_confirmation: Option<String>,
}

impl ApiRequest for UpdateProfileRequest {
    type Response = User;
    const PATH: &'static str = "/perfil";
    const METHOD: HttpMethod = HttpMethod::Put;
}

/// Day-by-day availability of a provider for one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthAvailabilityQuery {
    #[serde(skip)]
    pub provider_id: String,
    /// 1..=12
    pub month: u32,
    pub year: i32,
}

impl ApiRequest for MonthAvailabilityQuery {
    type Response = Vec<MonthAvailabilityItem>;
    const PATH: &'static str = "/prestadores/{id}/mes-disponibilidade";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        Self::PATH.replace("{id}", &self.provider_id)
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("mes", self.month.to_string()), ("ano", self.year.to_string())]
    }
}

/// Appointments of the signed-in provider for one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAppointmentsQuery {
    pub day: u32,
    /// 1..=12
    pub month: u32,
    pub year: i32,
}

impl ApiRequest for DayAppointmentsQuery {
    type Response = Vec<Appointment>;
    const PATH: &'static str = "/agendamentos/meus-agendamentos";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("dia", self.day.to_string()),
            ("mes", self.month.to_string()),
            ("ano", self.year.to_string()),
        ]
    }
}

/// Multipart avatar upload. The body is built by the browser client.
pub const AVATAR_PATH: &str = "/usuarios/avatar";
