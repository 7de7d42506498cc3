//! 书架查询与变更钩子

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{sweep_session, HookCtx, QueryHandle, QueryKey};
use bookworm_shared::protocol::TogglePayload;
use bookworm_shared::Shelve;

/// 订阅当前用户的书架记录
pub fn use_my_shelves(ctx: HookCtx) -> QueryHandle<Vec<Shelve>> {
    let (data, set_data) = signal(None::<Vec<Shelve>>);
    let (error, set_error) = signal(None::<String>);
    let (loading, set_loading) = signal(true);
    let refresh = RwSignal::new(0_u64);

    Effect::new(move |_| {
        ctx.cache.epoch(QueryKey::MyShelves);
        refresh.track();
        set_loading.set(true);

        spawn_local(async move {
            match ctx.api.my_shelves().await {
                Ok(shelves) => {
                    set_data.set(Some(shelves));
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

/// 切换书架状态（未上架 → 想读 → 在读 → 已读 → 下架）
///
/// 服务器的 message 描述这次落在了哪一步，原样冒泡；
/// 成功后书的详情和我的书架都过期。
pub async fn toggle_shelve(ctx: HookCtx, payload: TogglePayload) -> bool {
    match ctx.api.toggle_shelve(&payload).await {
        Ok(toggled) => {
            ctx.toaster
                .success(toggled.message.unwrap_or_else(|| "Shelf updated".into()));
            ctx.cache.invalidate(QueryKey::BookDetail);
            ctx.cache.invalidate(QueryKey::MyShelves);
            true
        }
        Err(err) => {
            sweep_session(&ctx.session, &err);
            ctx.toaster.error(err.message);
            false
        }
    }
}
