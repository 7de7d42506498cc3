//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 替代 `gloo-net`。请求与响应是纯数据结构，
//! 真正的发送动作隐藏在 `HttpClient` trait 之后，传输层（含令牌
//! 刷新重放）因此可以在原生测试里换用模拟客户端驱动。

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, Request, RequestInit, Response};

/// HTTP 请求方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// HTTP 错误类型
#[derive(Debug, Clone)]
pub enum HttpError {
    /// 请求构建失败
    RequestBuildFailed(String),
    /// 网络请求失败
    NetworkError(String),
    /// 响应解析失败
    ResponseParseFailed(String),
}

impl core::fmt::Display for HttpError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HttpError::RequestBuildFailed(msg) => write!(f, "failed to build request: {}", msg),
            HttpError::NetworkError(msg) => write!(f, "network error: {}", msg),
            HttpError::ResponseParseFailed(msg) => write!(f, "failed to read response: {}", msg),
        }
    }
}

// =========================================================
// 请求结构 (Request)
// =========================================================

/// 多部分表单。文本部分平台无关，文件部分只会在浏览器环境被填充，
/// 原生测试里保持为空。
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    pub texts: Vec<(String, String)>,
    pub files: Vec<(String, web_sys::File)>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.texts.push((name.to_string(), value.into()));
        self
    }

    pub fn file(mut self, name: &str, file: web_sys::File) -> Self {
        self.files.push((name.to_string(), file));
        self
    }

    /// 按名称取文本部分（测试断言用）
    pub fn text_part(&self, name: &str) -> Option<&str> {
        self.texts
            .iter()
            .find(|(part, _)| part == name)
            .map(|(_, value)| value.as_str())
    }
}

/// 请求体
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    /// 已序列化的 JSON 文本
    Json(String),
    /// multipart/form-data，Content-Type 由浏览器生成（含 boundary）
    Multipart(MultipartForm),
}

/// HTTP 请求的纯数据形态
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    /// 添加请求头
    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// 设置 JSON 请求体并补上 Content-Type
    pub fn with_json(mut self, json: String) -> Self {
        self.body = RequestBody::Json(json);
        self.with_header("Content-Type", "application/json")
    }

    /// 设置多部分表单请求体
    pub fn with_multipart(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    /// 按名称取请求头（测试断言用）
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

// =========================================================
// 响应结构 (Response)
// =========================================================

/// HTTP 响应的纯数据形态：响应体在接收时就读成字符串
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 将响应体按目标类型反序列化
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

// =========================================================
// 客户端抽象 (HttpClient)
// =========================================================

/// HTTP 客户端 trait。浏览器环境由 [`FetchHttpClient`] 实现，
/// 测试环境由模拟客户端实现。
#[async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

/// 基于 `window.fetch` 的客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

#[async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let headers = Headers::new()
            .map_err(|e| HttpError::RequestBuildFailed(format!("create headers: {:?}", e)))?;

        for (key, value) in &request.headers {
            headers
                .set(key, value)
                .map_err(|e| HttpError::RequestBuildFailed(format!("set header: {:?}", e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(request.method.as_str());
        opts.set_headers(&headers.into());

        match &request.body {
            RequestBody::Empty => {}
            RequestBody::Json(json) => {
                opts.set_body(&JsValue::from_str(json));
            }
            RequestBody::Multipart(form) => {
                let form_data = FormData::new()
                    .map_err(|e| HttpError::RequestBuildFailed(format!("{:?}", e)))?;
                for (name, value) in &form.texts {
                    form_data
                        .append_with_str(name, value)
                        .map_err(|e| HttpError::RequestBuildFailed(format!("{:?}", e)))?;
                }
                for (name, file) in &form.files {
                    form_data
                        .append_with_blob(name, file)
                        .map_err(|e| HttpError::RequestBuildFailed(format!("{:?}", e)))?;
                }
                opts.set_body(&form_data.into());
            }
        }

        let fetch_request = Request::new_with_str_and_init(&request.url, &opts)
            .map_err(|e| HttpError::RequestBuildFailed(format!("{:?}", e)))?;

        let window = web_sys::window()
            .ok_or_else(|| HttpError::NetworkError("window object unavailable".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&fetch_request))
            .await
            .map_err(|e| HttpError::NetworkError(format!("{:?}", e)))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| HttpError::ResponseParseFailed(format!("not a Response: {:?}", e)))?;

        let status = response.status();

        let promise = response
            .text()
            .map_err(|e| HttpError::ResponseParseFailed(format!("{:?}", e)))?;
        let text = JsFuture::from(promise)
            .await
            .map_err(|e| HttpError::ResponseParseFailed(format!("{:?}", e)))?;
        let body = text.as_string().unwrap_or_default();

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_json_sets_content_type() {
        let request = HttpRequest::new("http://api/books", HttpMethod::Post)
            .with_json(r#"{"title":"Dune"}"#.to_string());
        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert!(matches!(request.body, RequestBody::Json(_)));
    }

    #[test]
    fn multipart_keeps_text_parts_in_order() {
        let form = MultipartForm::new()
            .text("data", r#"{"name":"Ada"}"#)
            .text("note", "hello");
        assert_eq!(form.text_part("data"), Some(r#"{"name":"Ada"}"#));
        assert_eq!(form.text_part("missing"), None);
    }

    #[test]
    fn response_ok_covers_the_2xx_range() {
        let ok = HttpResponse { status: 204, body: String::new() };
        let not_ok = HttpResponse { status: 301, body: String::new() };
        assert!(ok.ok());
        assert!(!not_ok.ok());
    }
}
