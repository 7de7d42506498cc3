//! 登录与注册的变更钩子
//!
//! 成功后同步会话并预取档案；声明信号一变，
//! 路由守卫自己会把人送到对应角色的落地页。

use web_sys::File;

use super::HookCtx;
use bookworm_shared::protocol::{LoginPayload, RegisterPayload};

/// 登录
pub async fn login(ctx: HookCtx, payload: LoginPayload) -> bool {
    match ctx.api.login(&payload).await {
        Ok(done) => {
            ctx.session.sync_from_tokens(&ctx.api);
            ctx.session.load_profile(ctx.api);
            ctx.toaster
                .success(done.message.unwrap_or_else(|| "Login successful".into()));
            true
        }
        Err(err) => {
            ctx.toaster.error(err.message);
            false
        }
    }
}

/// 注册（注册即登录）
pub async fn register(ctx: HookCtx, payload: RegisterPayload, photo: Option<File>) -> bool {
    match ctx.api.register(&payload, photo).await {
        Ok(done) => {
            ctx.session.sync_from_tokens(&ctx.api);
            ctx.session.load_profile(ctx.api);
            ctx.toaster.success(
                done.message
                    .unwrap_or_else(|| "Registration successful".into()),
            );
            true
        }
        Err(err) => {
            ctx.toaster.error(err.message);
            false
        }
    }
}
