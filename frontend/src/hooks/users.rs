//! 用户查询与变更钩子（后台管理）

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{sweep_session, HookCtx, QueryHandle, QueryKey};
use bookworm_shared::{Role, User};

/// 订阅用户列表
pub fn use_users(ctx: HookCtx) -> QueryHandle<Vec<User>> {
    let (data, set_data) = signal(None::<Vec<User>>);
    let (error, set_error) = signal(None::<String>);
    let (loading, set_loading) = signal(true);
    let refresh = RwSignal::new(0_u64);

    Effect::new(move |_| {
        ctx.cache.epoch(QueryKey::Users);
        refresh.track();
        set_loading.set(true);

        spawn_local(async move {
            match ctx.api.list_users().await {
                Ok(users) => {
                    set_data.set(Some(users));
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

/// 调整用户角色；用户列表随之过期
pub async fn update_user_role(ctx: HookCtx, id: String, role: Role) -> bool {
    match ctx.api.update_user_role(&id, role).await {
        Ok(updated) => {
            ctx.toaster.success(
                updated
                    .message
                    .unwrap_or_else(|| "User role updated".into()),
            );
            ctx.cache.invalidate(QueryKey::Users);
            true
        }
        Err(err) => {
            sweep_session(&ctx.session, &err);
            ctx.toaster.error(err.message);
            false
        }
    }
}
