use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use gobarber_shared::error::{ApiError, ApiResult};
use gobarber_shared::protocol::{
    self, AVATAR_PATH, ApiRequest, HttpMethod, SessionResponse, SignInRequest,
};
use gobarber_shared::session::SessionGateway;
use gobarber_shared::{AVATAR_FIELD, HEADER_AUTHORIZATION, User};
use serde::de::DeserializeOwned;

/// GoBarber API 客户端
///
/// 不保存任何凭据；每个请求由调用方显式传入 Authorization 头。
#[derive(Clone, Debug, PartialEq)]
pub struct GoBarberApi {
    pub base_url: String,
}

impl GoBarberApi {
    pub fn new(base_url: String) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { base_url }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn builder(method: HttpMethod, url: &str, authorization: Option<&str>) -> RequestBuilder {
        let builder = match method {
            HttpMethod::Get => Request::get(url),
            HttpMethod::Post => Request::post(url),
            HttpMethod::Put => Request::put(url),
            HttpMethod::Patch => Request::patch(url),
        };
        match authorization {
            Some(value) => builder.header(HEADER_AUTHORIZATION, value),
            None => builder,
        }
    }

    /// 发送强类型请求并获取解析后的响应
    pub async fn send<T: ApiRequest>(
        &self,
        req: &T,
        authorization: Option<&str>,
    ) -> ApiResult<T::Response> {
        let url = self.url(&req.path());
        let builder = Self::builder(T::METHOD, &url, authorization);

        let res = match T::METHOD {
            HttpMethod::Get => builder.query(req.query()).send().await,
            _ => {
                builder
                    .json(req)
                    .map_err(|e| ApiError::decode(e.to_string()))?
                    .send()
                    .await
            }
        }
        .map_err(|e| ApiError::network(format!("{} {}: {}", T::PATH, url, e)))?;

        Self::read(res).await
    }

    /// 上传头像（multipart，字段名 `avatar`）
    pub async fn upload_avatar(
        &self,
        file: web_sys::File,
        authorization: Option<&str>,
    ) -> ApiResult<User> {
        let form = web_sys::FormData::new()
            .map_err(|e| ApiError::network(format!("创建 FormData 失败: {:?}", e)))?;
        form.append_with_blob(AVATAR_FIELD, &file)
            .map_err(|e| ApiError::network(format!("写入 FormData 失败: {:?}", e)))?;

        let url = self.url(AVATAR_PATH);
        let res = Self::builder(HttpMethod::Patch, &url, authorization)
            .body(form)
            .map_err(|e| ApiError::network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::network(format!("{}: {}", url, e)))?;

        Self::read(res).await
    }

    async fn read<R: DeserializeOwned>(res: Response) -> ApiResult<R> {
        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;

        if !res.ok() {
            return Err(ApiError::from_response(status, body));
        }

        protocol::decode_body(&body).map_err(|e| ApiError::decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl SessionGateway for GoBarberApi {
    async fn create_session(&self, request: &SignInRequest) -> ApiResult<SessionResponse> {
        self.send(request, None).await
    }
}
