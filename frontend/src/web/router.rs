//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 每次导航（主动跳转、前进后退、会话角色变化）都经过
//! `AppRoute::verdict` 的统一裁决。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use crate::logging::log_info;
use bookworm_shared::Role;

use super::route::{AppRoute, Verdict};

/// 获取当前浏览器路径
pub(crate) fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入会话角色信号实现与会话系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 会话角色（注入的信号，None 表示未登录）
    session_role: Signal<Option<Role>>,
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// # Arguments
    /// * `session_role` - 会话角色信号，由外部注入实现解耦
    fn new(session_role: Signal<Option<Role>>) -> Self {
        // 初始路由从 URL 解析；守卫由挂载后的角色 Effect 统一执行
        let path = current_path();
        let initial_route = AppRoute::from_path(&path);
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            session_role,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path), true);
    }

    /// 按路由枚举导航（详情页等携带参数的路由用这个入口）
    pub fn navigate_route(&self, route: AppRoute) {
        self.navigate_to_route(route, true);
    }

    /// 导航到指定路由
    ///
    /// # Arguments
    /// * `target_route` - 目标路由
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        let resolved = match target_route.verdict(self.session_role.get_untracked()) {
            Verdict::Allow => target_route,
            Verdict::Redirect(redirect) => {
                log_info!("[Router] {} denied, redirecting to {}", target_route, redirect);
                redirect
            }
        };

        let path = resolved.to_path();
        if use_push {
            push_history_state(&path);
        } else {
            replace_history_state(&path);
        }
        self.set_route.set(resolved);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let session_role = self.session_role;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());

            // popstate 时也执行守卫逻辑；重定向用 replace，避免污染历史栈
            match target_route.verdict(session_role.get_untracked()) {
                Verdict::Allow => set_route.set(target_route),
                Verdict::Redirect(redirect) => {
                    replace_history_state(&redirect.to_path());
                    set_route.set(redirect);
                }
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 会话角色变化时重新裁决当前路由
    ///
    /// 首次执行即覆盖初始加载的守卫；登录、登出、会话过期
    /// 都会经由这里自动跳转，页面组件无须手动导航。
    fn setup_session_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let session_role = self.session_role;

        Effect::new(move |_| {
            let role = session_role.get();
            let route = current_route.get_untracked();

            if let Verdict::Redirect(redirect) = route.verdict(role) {
                log_info!("[Router] Session changed, redirecting to {}", redirect);
                push_history_state(&redirect.to_path());
                set_route.set(redirect);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(session_role: Signal<Option<Role>>) -> RouterService {
    let router = RouterService::new(session_role);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_session_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 会话角色信号
    session_role: Signal<Option<Role>>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(session_role);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}
