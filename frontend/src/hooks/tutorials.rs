//! 教程查询与变更钩子

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{sweep_session, HookCtx, QueryHandle, QueryKey};
use bookworm_shared::protocol::TutorialPayload;
use bookworm_shared::Tutorial;

/// 订阅教程列表
pub fn use_tutorials(ctx: HookCtx) -> QueryHandle<Vec<Tutorial>> {
    let (data, set_data) = signal(None::<Vec<Tutorial>>);
    let (error, set_error) = signal(None::<String>);
    let (loading, set_loading) = signal(true);
    let refresh = RwSignal::new(0_u64);

    Effect::new(move |_| {
        ctx.cache.epoch(QueryKey::Tutorials);
        refresh.track();
        set_loading.set(true);

        spawn_local(async move {
            match ctx.api.list_tutorials().await {
                Ok(tutorials) => {
                    set_data.set(Some(tutorials));
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

/// 新建教程
pub async fn create_tutorial(ctx: HookCtx, payload: TutorialPayload) -> bool {
    match ctx.api.create_tutorial(&payload).await {
        Ok(created) => {
            ctx.toaster.success(
                created
                    .message
                    .unwrap_or_else(|| "Tutorial created successfully".into()),
            );
            ctx.cache.invalidate(QueryKey::Tutorials);
            true
        }
        Err(err) => {
            sweep_session(&ctx.session, &err);
            ctx.toaster.error(err.message);
            false
        }
    }
}
