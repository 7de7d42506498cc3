//! 错误类型模块
//!
//! 所有网络层失败都折叠进 `ApiError` 一个类型，组件只依赖
//! `kind` 与人类可读的 `message` 渲染提示，不再各自解析响应体。

use serde::Deserialize;
use std::fmt;

/// 规范化失败时的兜底文案
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

// =========================================================
// 错误分类 (Error Kind)
// =========================================================

/// 客户端错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 请求未能到达服务器（构建失败、网络中断、响应不可读）
    Network,
    /// 服务器以非 2xx 状态拒绝了请求
    Rejected,
    /// 响应体无法按预期结构解析
    Decode,
    /// 令牌刷新失败，本地会话已被清除
    SessionExpired,
}

// =========================================================
// 错误类型 (ApiError)
// =========================================================

/// 规范化的 API 错误
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    /// 服务器返回的 HTTP 状态码；未到达服务器时为 None
    pub status: Option<u16>,
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: message.into(),
            status: None,
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Decode,
            message: message.into(),
            status: None,
        }
    }

    pub fn session_expired() -> Self {
        Self {
            kind: ApiErrorKind::SessionExpired,
            message: "Your session has expired. Please log in again.".to_string(),
            status: Some(401),
        }
    }

    /// 从非 2xx 响应构造错误：文案取 `message` 字段，
    /// 其次 `error` 字段，都没有则用兜底文案
    pub fn from_response(status: u16, body: &str) -> Self {
        let message =
            response_message(body).unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
        Self {
            kind: ApiErrorKind::Rejected,
            message,
            status: Some(status),
        }
    }

    pub fn is_session_expired(&self) -> bool {
        self.kind == ApiErrorKind::SessionExpired
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (HTTP {status})", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}

impl From<crate::web::http::HttpError> for ApiError {
    fn from(err: crate::web::http::HttpError) -> Self {
        use crate::web::http::HttpError;
        match err {
            HttpError::ResponseParseFailed(_) => Self::decode(err.to_string()),
            _ => Self::network(err.to_string()),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

// =========================================================
// 响应体解析 (Response Body)
// =========================================================

/// 服务器错误响应体的宽松形态
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// 提取响应体里的人类可读消息（`message` 优先于 `error`）
pub fn response_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message.or(parsed.error))
        .filter(|message| !message.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_field_takes_precedence_over_error() {
        let body = r#"{"message":"Book not found","error":"NOT_FOUND"}"#;
        assert_eq!(response_message(body).as_deref(), Some("Book not found"));
    }

    #[test]
    fn error_field_is_used_when_message_is_absent() {
        let body = r#"{"error":"NOT_FOUND"}"#;
        assert_eq!(response_message(body).as_deref(), Some("NOT_FOUND"));
    }

    #[test]
    fn unparseable_body_falls_back_to_generic_message() {
        let err = ApiError::from_response(500, "<html>oops</html>");
        assert_eq!(err.message, GENERIC_ERROR_MESSAGE);
        assert_eq!(err.status, Some(500));
        assert_eq!(err.kind, ApiErrorKind::Rejected);
    }

    #[test]
    fn blank_message_is_treated_as_absent() {
        let body = r#"{"message":"  "}"#;
        assert_eq!(response_message(body), None);
    }
}
