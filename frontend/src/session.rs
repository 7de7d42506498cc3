//! 会话上下文模块
//!
//! 身份有两层：访问令牌里可立即解码的声明（id、email、role），
//! 和按需从 `/users/me` 拉取的完整档案。路由守卫只依赖前者，
//! 页面展示（头像、阅读目标）依赖后者。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::transport::TokenStore;
use crate::api::ApiClient;
use crate::logging::log_warn;
use crate::web::route::AppRoute;
use crate::web::router;
use bookworm_shared::token::AccessClaims;
use bookworm_shared::{Role, User};

/// 会话状态容器
#[derive(Clone, Copy)]
pub struct SessionContext {
    /// 访问令牌声明；None 即未登录
    pub claims: RwSignal<Option<AccessClaims>>,
    /// 完整用户档案（登录后异步填充）
    pub user: RwSignal<Option<User>>,
    /// 档案请求进行中
    pub loading: RwSignal<bool>,
}

impl SessionContext {
    fn new() -> Self {
        Self {
            claims: RwSignal::new(None),
            user: RwSignal::new(None),
            loading: RwSignal::new(false),
        }
    }

    /// 从令牌存储恢复声明（页面加载和登录后各走一次）
    pub fn sync_from_tokens(&self, api: &ApiClient) {
        let claims = api
            .tokens()
            .access_token()
            .and_then(|token| AccessClaims::decode(&token).ok());
        self.claims.set(claims);
    }

    /// 会话角色信号，路由守卫的唯一输入
    pub fn role(&self) -> Signal<Option<Role>> {
        let claims = self.claims;
        Signal::derive(move || claims.get().map(|claims| claims.role))
    }

    /// 当前用户 id（事件处理器里即时读取，不建立订阅）
    pub fn user_id(&self) -> Option<String> {
        self.claims.get_untracked().map(|claims| claims.id)
    }

    /// 异步拉取完整档案
    pub fn load_profile(&self, api: ApiClient) {
        let session = *self;
        session.loading.set(true);
        spawn_local(async move {
            match api.my_profile().await {
                Ok(profile) => session.user.set(Some(profile)),
                Err(err) => {
                    log_warn!("[Session] Failed to load profile: {}", err);
                    if err.is_session_expired() {
                        session.clear();
                    }
                }
            }
            session.loading.set(false);
        });
    }

    /// 清除本地会话状态；令牌清理由调用方负责
    pub fn clear(&self) {
        self.claims.set(None);
        self.user.set(None);
    }

    /// 登出。声明清空后路由守卫会自动跳回登录页。
    pub fn logout(&self, api: ApiClient) {
        let session = *self;
        spawn_local(async move {
            api.logout().await;
            session.clear();
        });
    }
}

/// 初始化并提供会话上下文
///
/// 公开页面不自动拉档案：未登录访问多数从这里进来，
/// 发一个注定 401 的请求毫无意义。
pub fn provide_session(api: ApiClient) -> SessionContext {
    let session = SessionContext::new();
    session.sync_from_tokens(&api);

    let route = AppRoute::from_path(&router::current_path());
    if session.claims.get_untracked().is_some() && !route.is_public() {
        session.load_profile(api);
    }

    provide_context(session);
    session
}

/// 从 Context 获取会话
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
        .expect("SessionContext not found in context. Ensure App provides it.")
}
