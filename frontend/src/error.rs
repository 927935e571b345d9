//! API 错误类型
//!
//! 与后端的错误语义对齐：每种错误类型对应一个状态码区间和机器可读的错误代码。

use louvor_shared::TokenError;

/// 错误类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 请求未能到达服务器 (fetch 失败、无 window 对象等)
    Network,
    /// 401/403，以及登录未返回 token
    Unauthorized,
    /// 404
    NotFound,
    /// 400/422，或表单必填项校验失败
    InvalidInput,
    /// 请求体编码或响应解析失败
    Serialization,
    /// 其他非 2xx 响应
    Server,
}

impl ErrorKind {
    /// 根据 HTTP 状态码推断错误类型
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ErrorKind::Unauthorized,
            404 => ErrorKind::NotFound,
            400 | 422 => ErrorKind::InvalidInput,
            _ => ErrorKind::Server,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ErrorKind::Network => "NETWORK_ERROR",
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::NotFound => "RESOURCE_NOT_FOUND",
            ErrorKind::InvalidInput => "INVALID_INPUT",
            ErrorKind::Serialization => "JSON_PARSE_ERROR",
            ErrorKind::Server => "UPSTREAM_ERROR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("[{}] {message}", .kind.error_code())]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    /// 服务器返回的状态码（网络错误时为 None）
    pub status: Option<u16>,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization, message)
    }

    /// 由非 2xx 响应构造
    pub fn from_response(status: u16, body: &str) -> Self {
        let body = body.trim();
        let message = if body.is_empty() {
            format!("HTTP {}", status)
        } else {
            server_message(body).unwrap_or_else(|| body.to_string())
        };
        Self {
            kind: ErrorKind::from_status(status),
            message,
            status: Some(status),
        }
    }

    /// 替换为固定的、面向用户的消息，保留错误类型
    pub fn context(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::serialization(e.to_string())
    }
}

impl From<TokenError> for ApiError {
    fn from(e: TokenError) -> Self {
        ApiError::unauthorized(format!("token inválido: {}", e))
    }
}

/// 从 JSON 错误体中取出可读消息：`{"message": ..}`、`{"error": ..}` 或 JSON 字符串
fn server_message(body: &str) -> Option<String> {
    match serde_json::from_str::<serde_json::Value>(body).ok()? {
        serde_json::Value::String(text) => Some(text),
        serde_json::Value::Object(map) => ["message", "error"]
            .iter()
            .find_map(|key| map.get(*key)?.as_str().map(str::to_string)),
        _ => None,
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorKind::from_status(401), ErrorKind::Unauthorized);
        assert_eq!(ErrorKind::from_status(403), ErrorKind::Unauthorized);
        assert_eq!(ErrorKind::from_status(404), ErrorKind::NotFound);
        assert_eq!(ErrorKind::from_status(422), ErrorKind::InvalidInput);
        assert_eq!(ErrorKind::from_status(500), ErrorKind::Server);
    }

    #[test]
    fn test_display_and_context() {
        let err = ApiError::from_response(404, "");
        assert_eq!(err.to_string(), "[RESOURCE_NOT_FOUND] HTTP 404");

        let err = err.context("Schedule not found.");
        assert!(err.is_not_found());
        assert_eq!(err.status, Some(404));
        assert_eq!(err.to_string(), "[RESOURCE_NOT_FOUND] Schedule not found.");
    }

    #[test]
    fn test_server_body_becomes_message() {
        let err = ApiError::from_response(400, " email já cadastrado ");
        assert_eq!(err.kind, ErrorKind::InvalidInput);
        assert_eq!(err.message, "email já cadastrado");
    }

    #[test]
    fn test_json_error_body_yields_message() {
        let body = r#"{"message":"Email já cadastrado","statusCode":400}"#;
        let err = ApiError::from_response(400, body);
        assert_eq!(err.message, "Email já cadastrado");

        let err = ApiError::from_response(500, r#"{"error":"Internal"}"#);
        assert_eq!(err.message, "Internal");

        let err = ApiError::from_response(401, r#""token expirado""#);
        assert_eq!(err.message, "token expirado");

        // 没有可读字段时保留原文
        let err = ApiError::from_response(502, r#"{"code":7}"#);
        assert_eq!(err.message, r#"{"code":7}"#);
    }
}
