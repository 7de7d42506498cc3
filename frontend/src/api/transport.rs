//! 认证传输层
//!
//! 所有请求统一从这里出站：自动附加 Bearer 令牌，访问令牌过期时
//! 静默刷新并重放一次原请求。业务 accessor 只描述路径和载荷，
//! 完全感知不到刷新流程。

use serde::de::DeserializeOwned;

use crate::error::{response_message, ApiError, ApiResult};
use crate::logging::{log_info, log_warn};
use crate::web::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use bookworm_shared::protocol::{ApiEnvelope, RefreshedToken};
use bookworm_shared::JWT_EXPIRED_MESSAGE;

// =========================================================
// 令牌存储 (TokenStore)
// =========================================================

/// 令牌存取抽象：生产环境落在 Cookie，测试环境落在内存
pub trait TokenStore {
    fn access_token(&self) -> Option<String>;
    fn refresh_token(&self) -> Option<String>;
    /// 只更新访问令牌（刷新未轮换 refresh token 时）
    fn store_access(&self, token: &str);
    /// 同时更新两枚令牌（登录、注册、刷新轮换时）
    fn store_pair(&self, access: &str, refresh: &str);
    fn clear(&self);
}

// =========================================================
// 响应载荷 (Payload)
// =========================================================

/// 解包后的成功响应：数据加上服务器附带的提示文案
#[derive(Debug, Clone)]
pub struct Payload<T> {
    pub data: T,
    pub message: Option<String>,
}

// =========================================================
// 传输状态机 (RequestPhase)
// =========================================================

/// 单个请求的生命周期阶段。`Retried` 之后不会再回到 `Refreshing`，
/// 刷新重放全局只发生一次。
enum RequestPhase {
    Initial,
    Refreshing,
    Retried,
    Failed,
}

// =========================================================
// 认证传输 (AuthTransport)
// =========================================================

/// 带令牌刷新语义的请求通道
#[derive(Clone, Copy)]
pub struct AuthTransport<C, S> {
    client: C,
    tokens: S,
    base_url: &'static str,
}

impl<C: HttpClient, S: TokenStore> AuthTransport<C, S> {
    pub fn new(client: C, tokens: S, base_url: &'static str) -> Self {
        Self {
            client,
            tokens,
            base_url,
        }
    }

    /// 令牌存储的直接入口（登录写入、登出清除走这里）
    pub fn tokens(&self) -> &S {
        &self.tokens
    }

    #[cfg(test)]
    pub(crate) fn client(&self) -> &C {
        &self.client
    }

    /// 拼接完整请求地址
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 发送请求并处理令牌过期
    ///
    /// 非 2xx 响应在这里折叠为 [`ApiError`]；调用方拿到的
    /// `HttpResponse` 一定是成功响应。
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let mut phase = RequestPhase::Initial;

        loop {
            match phase {
                RequestPhase::Initial | RequestPhase::Retried => {
                    let mut attempt = request.clone();
                    if let Some(token) = self.tokens.access_token() {
                        attempt = attempt.with_header("Authorization", &format!("Bearer {token}"));
                    }

                    let response = self.client.send(attempt).await?;
                    if response.ok() {
                        return Ok(response);
                    }

                    // 只有服务器明确判定访问令牌过期的 401 才触发刷新
                    let access_expired = response.status == 401
                        && response_message(&response.body).as_deref() == Some(JWT_EXPIRED_MESSAGE);

                    if access_expired && matches!(phase, RequestPhase::Initial) {
                        log_info!("[Api] Access token expired, refreshing");
                        phase = RequestPhase::Refreshing;
                    } else {
                        return Err(ApiError::from_response(response.status, &response.body));
                    }
                }
                RequestPhase::Refreshing => {
                    phase = match self.refresh_access_token().await {
                        Ok(()) => RequestPhase::Retried,
                        Err(err) => {
                            log_warn!("[Api] Token refresh failed: {}", err);
                            RequestPhase::Failed
                        }
                    };
                }
                RequestPhase::Failed => {
                    // 刷新失败后本地令牌已不可用，清掉避免反复触发
                    self.tokens.clear();
                    return Err(ApiError::session_expired());
                }
            }
        }
    }

    /// 用 refresh token 换新的 access token
    ///
    /// 刷新请求不走 [`Self::send`]，它携带的是 refresh token
    /// 而不是过期的 access token，也绝不能再次触发刷新。
    async fn refresh_access_token(&self) -> ApiResult<()> {
        let refresh = self
            .tokens
            .refresh_token()
            .ok_or_else(ApiError::session_expired)?;

        let request = HttpRequest::new(&self.url("/auth/refresh-token"), HttpMethod::Post)
            .with_json("{}".to_string())
            .with_header("Authorization", &format!("Bearer {refresh}"));

        let response = self.client.send(request).await?;
        if !response.ok() {
            return Err(ApiError::from_response(response.status, &response.body));
        }

        let envelope: ApiEnvelope<RefreshedToken> = response.json()?;
        let token = envelope
            .data
            .ok_or_else(|| ApiError::decode("refresh response carried no data"))?;

        match token.refresh_token {
            Some(rotated) => self.tokens.store_pair(&token.access_token, &rotated),
            None => self.tokens.store_access(&token.access_token),
        }
        Ok(())
    }

    /// 发送请求并把信封解包成类型化数据
    pub async fn execute<T: DeserializeOwned>(&self, request: HttpRequest) -> ApiResult<Payload<T>> {
        let response = self.send(request).await?;
        let envelope: ApiEnvelope<T> = response.json()?;
        let data = envelope
            .data
            .ok_or_else(|| ApiError::decode("response envelope carried no data"))?;
        Ok(Payload {
            data,
            message: envelope.message,
        })
    }

    /// 发送请求但不关心返回数据（删除类接口）
    ///
    /// 响应体可能为空，也可能是带 message 的信封，两者都接受。
    pub async fn execute_empty(&self, request: HttpRequest) -> ApiResult<Payload<()>> {
        let response = self.send(request).await?;
        let message = response_message(&response.body);
        Ok(Payload { data: (), message })
    }
}

#[cfg(test)]
mod tests;
