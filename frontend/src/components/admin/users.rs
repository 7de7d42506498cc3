use bookworm_shared::date::format_date;
use bookworm_shared::{Role, User};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::icons::Users as UsersIcon;
use crate::hooks::{self, use_hook_ctx};

#[component]
pub fn AdminUsersPage() -> impl IntoView {
    let ctx = use_hook_ctx();
    let session = ctx.session;
    let users = hooks::users::use_users(ctx);

    // 在途的角色变更，按用户 id 记账，避免同一行重复点击
    let busy = RwSignal::new(None::<String>);

    let row_count = move || users.data.get().map(|rows| rows.len()).unwrap_or(0);

    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold flex items-center gap-2">
                <UsersIcon attr:class="h-6 w-6 text-primary" /> "Users"
            </h1>

            {move || users.error.get().map(|message| view! {
                <div class="alert alert-error">{message}</div>
            })}

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"User"</th>
                                    <th class="hidden md:table-cell">"Email"</th>
                                    <th>"Role"</th>
                                    <th class="hidden md:table-cell">"Last login"</th>
                                    <th class="hidden md:table-cell">"Joined"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || row_count() == 0 && !users.loading.get()>
                                    <tr>
                                        <td colspan="6" class="text-center py-8 text-base-content/50">
                                            "No registered users."
                                        </td>
                                    </tr>
                                </Show>
                                <Show when=move || users.loading.get() && row_count() == 0>
                                    <tr>
                                        <td colspan="6" class="text-center py-8 text-base-content/50">
                                            <span class="loading loading-spinner loading-md"></span>
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=move || users.data.get().unwrap_or_default()
                                    key=|user| user.id.clone()
                                    children=move |user: User| {
                                        let row_id = user.id.clone();
                                        let target_role = if user.is_admin() { Role::User } else { Role::Admin };
                                        let is_self = {
                                            let row_id = row_id.clone();
                                            move || session.user_id().as_deref() == Some(row_id.as_str())
                                        };
                                        let is_busy = {
                                            let row_id = row_id.clone();
                                            move || busy.get().as_deref() == Some(row_id.as_str())
                                        };
                                        let on_toggle_role = {
                                            let row_id = row_id.clone();
                                            move |_| {
                                                let id = row_id.clone();
                                                busy.set(Some(id.clone()));
                                                spawn_local(async move {
                                                    hooks::users::update_user_role(ctx, id, target_role).await;
                                                    busy.set(None);
                                                });
                                            }
                                        };
                                        let role_badge = if user.is_admin() {
                                            "badge badge-primary badge-sm"
                                        } else {
                                            "badge badge-ghost badge-sm"
                                        };
                                        view! {
                                            <tr>
                                                <td>
                                                    <div class="flex items-center gap-3">
                                                        {match user.photo.clone() {
                                                            Some(photo) => view! {
                                                                <div class="avatar">
                                                                    <div class="w-8 rounded-full">
                                                                        <img src=photo alt=user.name.clone() />
                                                                    </div>
                                                                </div>
                                                            }.into_any(),
                                                            None => view! {
                                                                <div class="w-8 h-8 rounded-full bg-primary text-primary-content grid place-items-center text-sm font-bold">
                                                                    {user.initial().to_string()}
                                                                </div>
                                                            }.into_any(),
                                                        }}
                                                        <span class="font-semibold">{user.name.clone()}</span>
                                                    </div>
                                                </td>
                                                <td class="hidden md:table-cell text-sm">{user.email.clone()}</td>
                                                <td>
                                                    <span class=role_badge>{user.role.as_str()}</span>
                                                </td>
                                                <td class="hidden md:table-cell text-sm text-base-content/70">
                                                    {user
                                                        .last_login
                                                        .map(|ts| format_date(&ts))
                                                        .unwrap_or_else(|| "Never".into())}
                                                </td>
                                                <td class="hidden md:table-cell text-sm text-base-content/70">
                                                    {format_date(&user.created_at)}
                                                </td>
                                                <td>
                                                    <div class="flex justify-end">
                                                        {move || {
                                                            if is_self() {
                                                                view! {
                                                                    <span class="text-sm text-base-content/50">"(you)"</span>
                                                                }.into_any()
                                                            } else {
                                                                let label = match target_role {
                                                                    Role::Admin => "Make Admin",
                                                                    Role::User => "Make User",
                                                                };
                                                                view! {
                                                                    <button
                                                                        class="btn btn-outline btn-sm"
                                                                        disabled=is_busy.clone()
                                                                        on:click=on_toggle_role.clone()
                                                                    >
                                                                        {label}
                                                                    </button>
                                                                }.into_any()
                                                            }
                                                        }}
                                                    </div>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>
        </div>
    }
}
