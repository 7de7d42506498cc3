use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::fields::FieldError;
use crate::components::icons::BookOpen;
use crate::hooks::{self, use_hook_ctx};
use crate::web::router::use_router;
use bookworm_shared::protocol::LoginPayload;
use bookworm_shared::validate::{validate_login, FieldErrors};

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_hook_ctx();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let errors = RwSignal::new(FieldErrors::new());

    // 登录成功后会话声明变化，守卫自动跳到角色落地页
    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let payload = LoginPayload {
            email: email.get(),
            password: password.get(),
        };
        if let Err(found) = validate_login(&payload) {
            errors.set(found);
            return;
        }
        errors.set(FieldErrors::new());
        set_is_submitting.set(true);

        spawn_local(async move {
            hooks::auth::login(ctx, payload).await;
            set_is_submitting.set(false);
        });
    };

    let go_signup = move |ev: leptos::web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate("/register");
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <BookOpen attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"BookWorm"</h1>
                        <p class="text-base-content/70">
                            "Sign in to continue your reading journey"
                        </p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="reader@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                            />
                            <FieldError errors=errors field="email" />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                            />
                            <FieldError errors=errors field="password" />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign In".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm mt-2">
                            "Don't have an account? "
                            <a href="/register" class="link link-primary" on:click=go_signup>
                                "Sign up"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
