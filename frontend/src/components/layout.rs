//! 页面骨架
//!
//! 用户区共享顶部导航栏，后台共享侧边栏；
//! 两者都从会话上下文取身份渲染，登出后由守卫接管跳转。

use leptos::prelude::*;

use crate::components::icons::*;
use crate::hooks::use_hook_ctx;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 用户区骨架：导航栏 + 内容
#[component]
pub fn UserShell(children: Children) -> impl IntoView {
    let ctx = use_hook_ctx();
    let router = use_router();
    let session = ctx.session;

    let nav_link = |route: AppRoute, label: &'static str| {
        let target = route.clone();
        let is_active = {
            let route = route.clone();
            move || router.current_route().get() == route
        };
        view! {
            <li>
                <a
                    href=route.to_path()
                    class:active=is_active
                    on:click=move |ev: leptos::web_sys::MouseEvent| {
                        ev.prevent_default();
                        router.navigate_route(target.clone());
                    }
                >
                    {label}
                </a>
            </li>
        }
    };

    let on_logout = move |_| session.logout(ctx.api);

    view! {
        <div class="min-h-screen bg-base-200">
            <div class="navbar bg-base-100 shadow-lg px-4">
                <div class="flex-1 gap-2">
                    <BookOpen attr:class="text-primary h-6 w-6" />
                    <a
                        class="btn btn-ghost text-xl"
                        on:click=move |_| router.navigate_route(AppRoute::UserHome)
                    >
                        "BookWorm"
                    </a>
                </div>
                <div class="flex-none gap-2">
                    <ul class="menu menu-horizontal px-1 hidden md:flex">
                        {nav_link(AppRoute::UserHome, "Home")}
                        {nav_link(AppRoute::Browse, "Browse Books")}
                        {nav_link(AppRoute::UserLibrary, "My Library")}
                        {nav_link(AppRoute::Tutorials, "Tutorials")}
                    </ul>
                    <div class="dropdown dropdown-end">
                        <div tabindex="0" role="button" class="btn btn-ghost btn-circle avatar">
                            {move || match session.user.get().and_then(|user| user.photo) {
                                Some(photo) => view! {
                                    <div class="w-10 rounded-full">
                                        <img src=photo alt="avatar" />
                                    </div>
                                }.into_any(),
                                None => view! {
                                    <div class="w-10 rounded-full bg-primary text-primary-content grid place-items-center text-lg font-bold">
                                        {session.user.get().map(|user| user.initial().to_string()).unwrap_or_else(|| "?".into())}
                                    </div>
                                }.into_any(),
                            }}
                        </div>
                        <ul tabindex="0" class="mt-3 z-10 p-2 shadow menu menu-sm dropdown-content bg-base-100 rounded-box w-52">
                            <li class="menu-title">
                                {move || session.user.get().map(|user| user.name).unwrap_or_default()}
                            </li>
                            {nav_link(AppRoute::UserHome, "Home")}
                            {nav_link(AppRoute::UserLibrary, "My Library")}
                            <li>
                                <a on:click=on_logout>
                                    <LogOut attr:class="h-4 w-4" /> "Logout"
                                </a>
                            </li>
                        </ul>
                    </div>
                </div>
            </div>
            <main class="container mx-auto px-4 py-6">{children()}</main>
        </div>
    }
}

/// 后台骨架：侧边栏 + 内容
#[component]
pub fn AdminShell(children: Children) -> impl IntoView {
    let ctx = use_hook_ctx();
    let router = use_router();
    let session = ctx.session;

    let side_link = |route: AppRoute, label: &'static str, icon: fn() -> AnyView| {
        let target = route.clone();
        let is_active = {
            let route = route.clone();
            move || router.current_route().get() == route
        };
        view! {
            <li>
                <a
                    href=route.to_path()
                    class:active=is_active
                    on:click=move |ev: leptos::web_sys::MouseEvent| {
                        ev.prevent_default();
                        router.navigate_route(target.clone());
                    }
                >
                    {icon()} {label}
                </a>
            </li>
        }
    };

    let on_logout = move |_| session.logout(ctx.api);

    view! {
        <div class="flex min-h-screen bg-base-200">
            <aside class="w-64 bg-base-100 shadow-xl flex flex-col">
                <div class="p-4 flex items-center gap-2 border-b border-base-200">
                    <BookOpen attr:class="text-primary h-6 w-6" />
                    <span class="text-xl font-bold">"BookWorm Admin"</span>
                </div>
                <ul class="menu p-4 gap-1 flex-1">
                    {side_link(AppRoute::AdminDashboard, "Dashboard", || view! { <LayoutDashboard attr:class="h-4 w-4" /> }.into_any())}
                    {side_link(AppRoute::AdminBooks, "Books", || view! { <BookOpen attr:class="h-4 w-4" /> }.into_any())}
                    {side_link(AppRoute::AdminUsers, "Users", || view! { <Users attr:class="h-4 w-4" /> }.into_any())}
                    {side_link(AppRoute::AdminGenres, "Genres", || view! { <Tag attr:class="h-4 w-4" /> }.into_any())}
                    {side_link(AppRoute::AdminReviews, "Reviews", || view! { <MessageSquare attr:class="h-4 w-4" /> }.into_any())}
                    {side_link(AppRoute::AdminTutorials, "Tutorials", || view! { <Video attr:class="h-4 w-4" /> }.into_any())}
                </ul>
                <div class="p-4 border-t border-base-200">
                    <button on:click=on_logout class="btn btn-outline btn-error btn-sm w-full gap-2">
                        <LogOut attr:class="h-4 w-4" /> "Logout"
                    </button>
                </div>
            </aside>
            <main class="flex-1 p-6 overflow-x-auto">{children()}</main>
        </div>
    }
}
