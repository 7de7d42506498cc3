//! 图书查询与变更钩子

use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;

use super::{sweep_session, HookCtx, QueryHandle, QueryKey};
use bookworm_shared::protocol::{BookDetail, BookFilters, BookPayload, Paginated};
use bookworm_shared::Book;

/// 按筛选条件订阅分页书单
///
/// 筛选信号一变就重新拉取；输入抖动时用请求票据丢弃过期响应，
/// 保证最后落下的数据对应最新的筛选条件。
pub fn use_book_list(ctx: HookCtx, filters: Signal<BookFilters>) -> QueryHandle<Paginated<Book>> {
    let (data, set_data) = signal(None::<Paginated<Book>>);
    let (error, set_error) = signal(None::<String>);
    let (loading, set_loading) = signal(true);
    let refresh = RwSignal::new(0_u64);
    let ticket = StoredValue::new(0_u64);

    Effect::new(move |_| {
        ctx.cache.epoch(QueryKey::Books);
        refresh.track();
        let filters = filters.get();

        let my_ticket = ticket.with_value(|t| t + 1);
        ticket.set_value(my_ticket);
        set_loading.set(true);

        spawn_local(async move {
            let result = ctx.api.list_books(&filters).await;
            if ticket.get_value() != my_ticket {
                // 已有更新的请求在路上，丢弃这份过期结果
                return;
            }
            match result {
                Ok(page) => {
                    set_data.set(Some(page));
                    set_error.set(None);
                }
                Err(err) => {
                    sweep_session(&ctx.session, &err);
                    set_error.set(Some(err.message));
                }
            }
            set_loading.set(false);
        });
    });

    QueryHandle {
        data,
        error,
        loading,
        refresh,
    }
}

/// 订阅单本书的详情（含评论）
pub fn use_book_detail(ctx: HookCtx, id: String) -> QueryHandle<BookDetail> {
    let (data, set_data) = signal(None::<BookDetail>);
    let (error, set_error) = signal(None::<String>);
    let (loading, set_loading) = signal(true);
    let refresh = RwSignal::new(0_u64);
    let ticket = StoredValue::new(0_u64);

    Effect::new(move |_| {
        ctx.cache.epoch(QueryKey::BookDetail);
        refresh.track();
        let id = id.clone();

        let my_ticket = ticket.with_value(|t| t + 1);
        ticket.set_value(my_ticket);
        set_loading.set(true);

        spawn_local(async move {
            let result = ctx.api.book_detail(&id).await;
            if ticket.get_value() != my_ticket {
                return;
            }
            match result {
                Ok(detail) => {
                    set_data.set(Some(detail));
                    set_error.set(None);
                }
                Err(err) => {
                    sweep_session(&ctx.session, &err);
                    set_error.set(Some(err.message));
                }
            }
            set_loading.set(false);
        });
    });

    QueryHandle {
        data,
        error,
        loading,
        refresh,
    }
}

/// 订阅推荐书单
pub fn use_recommended_books(ctx: HookCtx) -> QueryHandle<Vec<Book>> {
    let (data, set_data) = signal(None::<Vec<Book>>);
    let (error, set_error) = signal(None::<String>);
    let (loading, set_loading) = signal(true);
    let refresh = RwSignal::new(0_u64);

    Effect::new(move |_| {
        ctx.cache.epoch(QueryKey::Recommended);
        refresh.track();
        set_loading.set(true);

        spawn_local(async move {
            match ctx.api.recommended_books().await {
                Ok(books) => {
                    set_data.set(Some(books));
                    set_error.set(None);
                }
                Err(err) => {
                    sweep_session(&ctx.session, &err);
                    set_error.set(Some(err.message));
                }
            }
            set_loading.set(false);
        });
    });

    QueryHandle {
        data,
        error,
        loading,
        refresh,
    }
}

/// 新建图书；成功后书单与推荐位都过期
pub async fn create_book(ctx: HookCtx, payload: BookPayload, cover: Option<File>) -> bool {
    match ctx.api.create_book(&payload, cover).await {
        Ok(created) => {
            ctx.toaster.success(
                created
                    .message
                    .unwrap_or_else(|| "Book created successfully".into()),
            );
            ctx.cache.invalidate(QueryKey::Books);
            ctx.cache.invalidate(QueryKey::Recommended);
            true
        }
        Err(err) => {
            sweep_session(&ctx.session, &err);
            ctx.toaster.error(err.message);
            false
        }
    }
}

/// 更新图书
pub async fn update_book(ctx: HookCtx, id: String, payload: BookPayload, cover: Option<File>) -> bool {
    match ctx.api.update_book(&id, &payload, cover).await {
        Ok(updated) => {
            ctx.toaster.success(
                updated
                    .message
                    .unwrap_or_else(|| "Book updated successfully".into()),
            );
            ctx.cache.invalidate(QueryKey::Books);
            ctx.cache.invalidate(QueryKey::BookDetail);
            ctx.cache.invalidate(QueryKey::Recommended);
            true
        }
        Err(err) => {
            sweep_session(&ctx.session, &err);
            ctx.toaster.error(err.message);
            false
        }
    }
}

/// 删除图书
pub async fn delete_book(ctx: HookCtx, id: String) -> bool {
    match ctx.api.delete_book(&id).await {
        Ok(deleted) => {
            ctx.toaster.success(
                deleted
                    .message
                    .unwrap_or_else(|| "Book deleted successfully".into()),
            );
            ctx.cache.invalidate(QueryKey::Books);
            ctx.cache.invalidate(QueryKey::Recommended);
            true
        }
        Err(err) => {
            sweep_session(&ctx.session, &err);
            ctx.toaster.error(err.message);
            false
        }
    }
}
