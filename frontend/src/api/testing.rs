//! API 层共用的测试替身：脚本化 HTTP 客户端与内存令牌存储

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;

use super::transport::TokenStore;
use super::Api;
use crate::web::http::{HttpClient, HttpError, HttpRequest, HttpResponse};

pub(crate) const BASE: &str = "http://api.test/api/v1";

// =========================================================
// MockHttpClient
// =========================================================

/// 按 URL 排队响应的模拟客户端。队列弹到最后一条后重复返回，
/// 同时记录每一个出站请求供断言。
#[derive(Default)]
pub(crate) struct MockHttpClient {
    responses: RefCell<HashMap<String, VecDeque<(u16, String)>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MockHttpClient {
    pub(crate) fn stub(&self, path: &str, status: u16, body: &str) {
        self.responses
            .borrow_mut()
            .entry(format!("{BASE}{path}"))
            .or_default()
            .push_back((status, body.to_string()));
    }

    pub(crate) fn recorded(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    /// 最后一个出站请求（accessor 测试多数只关心它）
    pub(crate) fn last_request(&self) -> HttpRequest {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("at least one request was sent")
    }

    pub(crate) fn refresh_calls(&self) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|request| request.url.ends_with("/auth/refresh-token"))
            .count()
    }
}

#[async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.borrow_mut().push(request.clone());

        let mut responses = self.responses.borrow_mut();
        let queue = responses
            .get_mut(&request.url)
            .ok_or_else(|| HttpError::NetworkError(format!("no stub for {}", request.url)))?;

        let (status, body) = if queue.len() > 1 {
            queue.pop_front().expect("queue checked non-empty")
        } else {
            queue
                .front()
                .cloned()
                .ok_or_else(|| HttpError::NetworkError(format!("empty stub for {}", request.url)))?
        };
        Ok(HttpResponse { status, body })
    }
}

// =========================================================
// MemoryTokenStore
// =========================================================

/// 内存令牌存储，替代浏览器 Cookie
#[derive(Default)]
pub(crate) struct MemoryTokenStore {
    access: RefCell<Option<String>>,
    refresh: RefCell<Option<String>>,
}

impl TokenStore for MemoryTokenStore {
    fn access_token(&self) -> Option<String> {
        self.access.borrow().clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.refresh.borrow().clone()
    }

    fn store_access(&self, token: &str) {
        *self.access.borrow_mut() = Some(token.to_string());
    }

    fn store_pair(&self, access: &str, refresh: &str) {
        *self.access.borrow_mut() = Some(access.to_string());
        *self.refresh.borrow_mut() = Some(refresh.to_string());
    }

    fn clear(&self) {
        *self.access.borrow_mut() = None;
        *self.refresh.borrow_mut() = None;
    }
}

/// 已登录状态的 Api 实例
pub(crate) fn logged_in_api() -> Api<MockHttpClient, MemoryTokenStore> {
    let tokens = MemoryTokenStore::default();
    tokens.store_pair("stale-access", "valid-refresh");
    Api::with_parts(MockHttpClient::default(), tokens, BASE)
}

/// 未登录状态的 Api 实例
pub(crate) fn anonymous_api() -> Api<MockHttpClient, MemoryTokenStore> {
    Api::with_parts(MockHttpClient::default(), MemoryTokenStore::default(), BASE)
}
