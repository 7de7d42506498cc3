//! 类别查询与变更钩子

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{sweep_session, HookCtx, QueryHandle, QueryKey};
use bookworm_shared::protocol::GenrePayload;
use bookworm_shared::Genre;

/// 订阅类别列表
pub fn use_genres(ctx: HookCtx) -> QueryHandle<Vec<Genre>> {
    let (data, set_data) = signal(None::<Vec<Genre>>);
    let (error, set_error) = signal(None::<String>);
    let (loading, set_loading) = signal(true);
    let refresh = RwSignal::new(0_u64);

    Effect::new(move |_| {
        ctx.cache.epoch(QueryKey::Genres);
        refresh.track();
        set_loading.set(true);

        spawn_local(async move {
            match ctx.api.list_genres().await {
                Ok(genres) => {
                    set_data.set(Some(genres));
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

/// 新建类别；成功后类别列表立即过期，后续渲染无须手动刷新
pub async fn create_genre(ctx: HookCtx, payload: GenrePayload) -> bool {
    match ctx.api.create_genre(&payload).await {
        Ok(created) => {
            ctx.toaster.success(
                created
                    .message
                    .unwrap_or_else(|| "Genre created successfully".into()),
            );
            ctx.cache.invalidate(QueryKey::Genres);
            true
        }
        Err(err) => {
            sweep_session(&ctx.session, &err);
            ctx.toaster.error(err.message);
            false
        }
    }
}

/// 更新类别
pub async fn update_genre(ctx: HookCtx, id: String, payload: GenrePayload) -> bool {
    match ctx.api.update_genre(&id, &payload).await {
        Ok(updated) => {
            ctx.toaster.success(
                updated
                    .message
                    .unwrap_or_else(|| "Genre updated successfully".into()),
            );
            ctx.cache.invalidate(QueryKey::Genres);
            true
        }
        Err(err) => {
            sweep_session(&ctx.session, &err);
            ctx.toaster.error(err.message);
            false
        }
    }
}

/// 删除类别
pub async fn delete_genre(ctx: HookCtx, id: String) -> bool {
    match ctx.api.delete_genre(&id).await {
        Ok(deleted) => {
            ctx.toaster.success(
                deleted
                    .message
                    .unwrap_or_else(|| "Genre deleted successfully".into()),
            );
            ctx.cache.invalidate(QueryKey::Genres);
            true
        }
        Err(err) => {
            sweep_session(&ctx.session, &err);
            ctx.toaster.error(err.message);
            false
        }
    }
}
