//! API 客户端模块
//!
//! `Api` 把传输层和各资源的 accessor 聚合成一个可 Copy 的客户端。
//! 按资源拆分的方法实现见 `api/` 下的子模块，
//! 刷新重放状态机见 [`transport`]。

use leptos::prelude::*;

use crate::config;
use crate::web::cookies::Cookies;
use crate::web::http::FetchHttpClient;

pub mod auth;
pub mod books;
pub mod genres;
pub mod reviews;
pub mod shelves;
pub mod transport;
pub mod tutorials;
pub mod users;

#[cfg(test)]
pub(crate) mod testing;

use bookworm_shared::{COOKIE_ACCESS_TOKEN, COOKIE_REFRESH_TOKEN};
use transport::{AuthTransport, TokenStore};

// =========================================================
// Cookie 令牌存储
// =========================================================

/// 把令牌对落在 Cookie 的存储实现
#[derive(Clone, Copy, Default)]
pub struct CookieTokenStore;

impl TokenStore for CookieTokenStore {
    fn access_token(&self) -> Option<String> {
        Cookies::get(COOKIE_ACCESS_TOKEN)
    }

    fn refresh_token(&self) -> Option<String> {
        Cookies::get(COOKIE_REFRESH_TOKEN)
    }

    fn store_access(&self, token: &str) {
        Cookies::set(COOKIE_ACCESS_TOKEN, token);
    }

    fn store_pair(&self, access: &str, refresh: &str) {
        Cookies::set(COOKIE_ACCESS_TOKEN, access);
        Cookies::set(COOKIE_REFRESH_TOKEN, refresh);
    }

    fn clear(&self) {
        Cookies::delete(COOKIE_ACCESS_TOKEN);
        Cookies::delete(COOKIE_REFRESH_TOKEN);
    }
}

// =========================================================
// Api 客户端
// =========================================================

/// 平台客户端。资源方法分布在 `api/` 子模块的 impl 块里。
#[derive(Clone, Copy)]
pub struct Api<C, S> {
    transport: AuthTransport<C, S>,
}

/// 生产环境的具体客户端类型
pub type ApiClient = Api<FetchHttpClient, CookieTokenStore>;

impl<C, S> Api<C, S>
where
    C: crate::web::http::HttpClient,
    S: TokenStore,
{
    pub fn with_parts(client: C, tokens: S, base_url: &'static str) -> Self {
        Self {
            transport: AuthTransport::new(client, tokens, base_url),
        }
    }

    /// 令牌存储入口（会话初始化和登出要用）
    pub fn tokens(&self) -> &S {
        self.transport.tokens()
    }

    #[cfg(test)]
    pub(crate) fn client(&self) -> &C {
        self.transport.client()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_parts(FetchHttpClient, CookieTokenStore, config::api_base_url())
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// 提供 API 客户端到 Context
pub fn provide_api() -> ApiClient {
    let api = ApiClient::new();
    provide_context(api);
    api
}

/// 从 Context 获取 API 客户端
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>().expect("ApiClient not found in context. Ensure App provides it.")
}
