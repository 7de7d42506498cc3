//! 评论查询与变更钩子

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{sweep_session, HookCtx, QueryHandle, QueryKey};
use bookworm_shared::protocol::ReviewPayload;
use bookworm_shared::Review;

/// 订阅全部评论（后台审核列表）
pub fn use_reviews(ctx: HookCtx) -> QueryHandle<Vec<Review>> {
    let (data, set_data) = signal(None::<Vec<Review>>);
    let (error, set_error) = signal(None::<String>);
    let (loading, set_loading) = signal(true);
    let refresh = RwSignal::new(0_u64);

    Effect::new(move |_| {
        ctx.cache.epoch(QueryKey::Reviews);
        refresh.track();
        set_loading.set(true);

        spawn_local(async move {
            match ctx.api.list_reviews().await {
                Ok(reviews) => {
                    set_data.set(Some(reviews));
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

/// 发表评论；详情页的评论区随之过期
pub async fn create_review(ctx: HookCtx, payload: ReviewPayload) -> bool {
    match ctx.api.create_review(&payload).await {
        Ok(created) => {
            ctx.toaster.success(
                created
                    .message
                    .unwrap_or_else(|| "Review submitted successfully".into()),
            );
            ctx.cache.invalidate(QueryKey::BookDetail);
            ctx.cache.invalidate(QueryKey::Reviews);
            true
        }
        Err(err) => {
            sweep_session(&ctx.session, &err);
            ctx.toaster.error(err.message);
            false
        }
    }
}

/// 删除评论；审核列表与详情页评论区一并过期
pub async fn delete_review(ctx: HookCtx, id: String) -> bool {
    match ctx.api.delete_review(&id).await {
        Ok(deleted) => {
            ctx.toaster.success(
                deleted
                    .message
                    .unwrap_or_else(|| "Review deleted successfully".into()),
            );
            ctx.cache.invalidate(QueryKey::Reviews);
            ctx.cache.invalidate(QueryKey::BookDetail);
            true
        }
        Err(err) => {
            sweep_session(&ctx.session, &err);
            ctx.toaster.error(err.message);
            false
        }
    }
}
