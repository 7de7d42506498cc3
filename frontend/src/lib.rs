//! BookWorm 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（守卫引擎）
//! - `api`: 认证传输层与资源访问器
//! - `session`: 会话状态管理
//! - `hooks`: 缓存感知的查询/变更钩子
//! - `components`: UI 组件层

mod api;
mod components {
    pub mod admin {
        mod book_dialog;
        pub mod books;
        pub mod dashboard;
        pub mod genres;
        pub mod reviews;
        pub mod tutorials;
        pub mod users;
    }
    mod add_review_dialog;
    mod book_card;
    pub mod book_detail;
    pub mod browse;
    mod confirm_dialog;
    mod fields;
    pub mod home;
    mod icons;
    pub mod layout;
    pub mod library;
    pub mod login;
    pub mod not_found;
    mod rating;
    pub mod signup;
    pub mod tutorials;
}
mod config;
mod error;
mod hooks;
mod logging;
mod session;
mod toast;

use crate::api::provide_api;
use crate::components::admin::books::AdminBooksPage;
use crate::components::admin::dashboard::AdminDashboardPage;
use crate::components::admin::genres::AdminGenresPage;
use crate::components::admin::reviews::AdminReviewsPage;
use crate::components::admin::tutorials::AdminTutorialsPage;
use crate::components::admin::users::AdminUsersPage;
use crate::components::book_detail::BookDetailPage;
use crate::components::browse::BrowsePage;
use crate::components::home::HomePage;
use crate::components::layout::{AdminShell, UserShell};
use crate::components::library::LibraryPage;
use crate::components::login::LoginPage;
use crate::components::not_found::NotFoundPage;
use crate::components::signup::SignupPage;
use crate::components::tutorials::TutorialsPage;
use crate::hooks::provide_query_cache;
use crate::session::provide_session;
use crate::toast::{provide_toaster, ToastHost};

use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    pub mod cookies;
    pub mod http;
    pub mod route;
    pub mod router;
    pub mod timer;
}

use web::route::{AppRoute, Section};
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件，并按路由所属区块
/// 包上用户导航栏或管理侧边栏。
fn route_matcher(route: AppRoute) -> AnyView {
    let section = route.section();
    let page = match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Signup => view! { <SignupPage /> }.into_any(),
        // 根路径只在守卫裁决前短暂可见
        AppRoute::Root => view! { <div class="min-h-screen bg-base-200"></div> }.into_any(),
        AppRoute::Browse => view! { <BrowsePage /> }.into_any(),
        AppRoute::BookDetail(id) => view! { <BookDetailPage id=id /> }.into_any(),
        AppRoute::UserHome => view! { <HomePage /> }.into_any(),
        AppRoute::UserLibrary => view! { <LibraryPage /> }.into_any(),
        AppRoute::Tutorials => view! { <TutorialsPage /> }.into_any(),
        AppRoute::AdminDashboard => view! { <AdminDashboardPage /> }.into_any(),
        AppRoute::AdminBooks => view! { <AdminBooksPage /> }.into_any(),
        AppRoute::AdminGenres => view! { <AdminGenresPage /> }.into_any(),
        AppRoute::AdminReviews => view! { <AdminReviewsPage /> }.into_any(),
        AppRoute::AdminUsers => view! { <AdminUsersPage /> }.into_any(),
        AppRoute::AdminTutorials => view! { <AdminTutorialsPage /> }.into_any(),
        AppRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
    };

    match section {
        Section::Auth | Section::Bare => page,
        Section::User => view! { <UserShell>{page}</UserShell> }.into_any(),
        Section::Admin => view! { <AdminShell>{page}</AdminShell> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 供给全局上下文：API 客户端、提示、查询缓存
    let api = provide_api();
    provide_toaster();
    provide_query_cache();

    // 2. 从 Cookie 同步会话声明，必要时拉取完整档案
    let session = provide_session(api);

    view! {
        // 3. 路由器组件：注入会话角色信号实现守卫
        <Router session_role=session.role()>
            <ToastHost />
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
