//! 数据钩子模块
//!
//! 查询钩子负责拉取与缓存订阅，变更函数负责提交、失效对应缓存键
//! 并冒泡 toast。两者共享 [`HookCtx`] 依赖束，组件不直接碰 API 客户端。

pub mod auth;
pub mod books;
pub mod genres;
pub mod reviews;
pub mod shelves;
pub mod tutorials;
pub mod users;

use leptos::prelude::*;

use crate::api::{use_api, ApiClient};
use crate::error::ApiError;
use crate::session::{use_session, SessionContext};
use crate::toast::{use_toaster, Toaster};

// =========================================================
// 缓存键与纪元缓存 (QueryCache)
// =========================================================

/// 缓存键：每个键对应一枚失效纪元计数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKey {
    Books,
    BookDetail,
    Recommended,
    Genres,
    Reviews,
    MyShelves,
    Users,
    Tutorials,
}

/// 失效纪元缓存
///
/// 变更成功后把对应键的纪元 +1；订阅该键的查询钩子
/// 观察到纪元变化即重新拉取。没有数据本体，只有"过期了"这件事。
#[derive(Clone, Copy)]
pub struct QueryCache {
    books: RwSignal<u64>,
    book_detail: RwSignal<u64>,
    recommended: RwSignal<u64>,
    genres: RwSignal<u64>,
    reviews: RwSignal<u64>,
    my_shelves: RwSignal<u64>,
    users: RwSignal<u64>,
    tutorials: RwSignal<u64>,
}

impl QueryCache {
    fn new() -> Self {
        Self {
            books: RwSignal::new(0),
            book_detail: RwSignal::new(0),
            recommended: RwSignal::new(0),
            genres: RwSignal::new(0),
            reviews: RwSignal::new(0),
            my_shelves: RwSignal::new(0),
            users: RwSignal::new(0),
            tutorials: RwSignal::new(0),
        }
    }

    fn signal(&self, key: QueryKey) -> RwSignal<u64> {
        match key {
            QueryKey::Books => self.books,
            QueryKey::BookDetail => self.book_detail,
            QueryKey::Recommended => self.recommended,
            QueryKey::Genres => self.genres,
            QueryKey::Reviews => self.reviews,
            QueryKey::MyShelves => self.my_shelves,
            QueryKey::Users => self.users,
            QueryKey::Tutorials => self.tutorials,
        }
    }

    /// 读取并订阅某个键的当前纪元
    pub fn epoch(&self, key: QueryKey) -> u64 {
        self.signal(key).get()
    }

    /// 宣告某个键下的数据已过时
    pub fn invalidate(&self, key: QueryKey) {
        self.signal(key).update(|epoch| *epoch += 1);
    }
}

/// 提供查询缓存到 Context
pub fn provide_query_cache() -> QueryCache {
    let cache = QueryCache::new();
    provide_context(cache);
    cache
}

/// 从 Context 获取查询缓存
pub fn use_query_cache() -> QueryCache {
    use_context::<QueryCache>().expect("QueryCache not found in context. Ensure App provides it.")
}

// =========================================================
// 查询句柄 (QueryHandle)
// =========================================================

/// 查询钩子交给组件的句柄
pub struct QueryHandle<T: Send + Sync + 'static> {
    pub data: ReadSignal<Option<T>>,
    pub error: ReadSignal<Option<String>>,
    pub loading: ReadSignal<bool>,
    refresh: RwSignal<u64>,
}

impl<T: Send + Sync + 'static> QueryHandle<T> {
    /// 绕过缓存键，手动重新拉取这一个查询
    pub fn refetch(&self) {
        self.refresh.update(|n| *n += 1);
    }
}

impl<T: Send + Sync + 'static> Clone for QueryHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for QueryHandle<T> {}

// =========================================================
// 依赖束 (HookCtx)
// =========================================================

/// 查询与变更共享的依赖束
#[derive(Clone, Copy)]
pub struct HookCtx {
    pub api: ApiClient,
    pub cache: QueryCache,
    pub toaster: Toaster,
    pub session: SessionContext,
}

/// 在组件里聚合依赖束
pub fn use_hook_ctx() -> HookCtx {
    HookCtx {
        api: use_api(),
        cache: use_query_cache(),
        toaster: use_toaster(),
        session: use_session(),
    }
}

/// 请求失败的会话兜底：刷新管线宣告会话过期时，
/// 清掉本地声明，路由守卫随即把人送回登录页。
pub(crate) fn sweep_session(session: &SessionContext, err: &ApiError) {
    if err.is_session_expired() {
        session.clear();
    }
}
