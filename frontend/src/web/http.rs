//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 发送请求。上层只依赖 `HttpClient` trait，
//! 测试中以 `MockHttpClient` 替换。

use std::collections::HashMap;

use louvor_shared::protocol::HttpMethod;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestCredentials, RequestInit, Response};

use crate::error::{ApiError, ApiResult};

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 检查响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 解析 JSON 响应体，空响应体按 `null` 处理（用于 `()` 等类型）
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        let body = self.body.trim();
        let body = if body.is_empty() { "null" } else { body };
        serde_json::from_str(body).map_err(ApiError::from)
    }
}

/// HTTP 客户端特性 (Trait)
///
/// (?Send) 是因为浏览器环境下 JsFuture 不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait HttpClient: Send + Sync {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}

// =========================================================
// 实现层: 浏览器 fetch
// =========================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

impl FetchHttpClient {
    async fn fetch(req: HttpRequest) -> Result<HttpResponse, JsValue> {
        let headers = Headers::new()?;
        for (key, value) in &req.headers {
            headers.set(key, value)?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());
        // 相当于 axios 的 withCredentials
        opts.set_credentials(RequestCredentials::Include);
        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)?;
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("无法获取 window 对象"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
        let response: Response = resp_value.dyn_into()?;
        let status = response.status();

        let text = JsFuture::from(response.text()?).await?;
        Ok(HttpResponse {
            status,
            body: text.as_string().unwrap_or_default(),
        })
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let url = req.url.clone();
        Self::fetch(req).await.map_err(|e| {
            let detail = e.as_string().unwrap_or_else(|| format!("{:?}", e));
            tracing::warn!(%url, %detail, "fetch failed");
            ApiError::network(format!("Erro de rede: {}", detail))
        })
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
pub use mock::{MockHttpClient, RecordedRequest};


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_body_decodes_as_unit() {
        let resp = HttpResponse {
            status: 204,
            body: String::new(),
        };
        assert!(resp.ok());
        resp.json::<()>().unwrap();
    }

    #[test]
    fn test_invalid_json_is_serialization_error() {
        let resp = HttpResponse {
            status: 200,
            body: "<html>".to_string(),
        };
        let err = resp.json::<Vec<String>>().unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Serialization);
    }

    #[tokio::test]
    async fn test_mock_records_requests() {
        let client = MockHttpClient::new();
        client.mock_response(HttpMethod::Get, "http://x/songs", 200, json!([]));

        let req = HttpRequest::new("http://x/songs", HttpMethod::Get).with_header("A", "b");
        let resp = client.send(req).await.unwrap();
        assert_eq!(resp.status, 200);

        let missing = client
            .send(HttpRequest::new("http://x/other", HttpMethod::Get))
            .await
            .unwrap();
        assert_eq!(missing.status, 404);

        assert_eq!(client.requests().len(), 2);
        assert_eq!(client.requests()[0].headers.get("A").map(String::as_str), Some("b"));
    }
}
