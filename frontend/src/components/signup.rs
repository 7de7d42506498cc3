use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::fields::FieldError;
use crate::components::icons::BookOpen;
use crate::hooks::{self, use_hook_ctx};
use crate::web::router::use_router;
use bookworm_shared::protocol::RegisterPayload;
use bookworm_shared::validate::{validate_signup, FieldErrors};

#[component]
pub fn SignupPage() -> impl IntoView {
    let ctx = use_hook_ctx();
    let router = use_router();

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (photo_size, set_photo_size) = signal(None::<u64>);
    let (is_submitting, set_is_submitting) = signal(false);
    let errors = RwSignal::new(FieldErrors::new());

    // File 不是线程安全类型，放线程本地的 StoredValue，
    // 提交时整体移进异步块
    let photo_file = StoredValue::new_local(None::<web_sys::File>);

    let on_photo_change = move |ev: leptos::web_sys::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let file = input.files().and_then(|files| files.get(0));
        set_photo_size.set(file.as_ref().map(|file| file.size() as u64));
        photo_file.set_value(file);
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let payload = RegisterPayload {
            name: name.get(),
            email: email.get(),
            password: password.get(),
        };
        if let Err(found) = validate_signup(&payload, photo_size.get_untracked()) {
            errors.set(found);
            return;
        }
        errors.set(FieldErrors::new());
        set_is_submitting.set(true);

        let photo = photo_file.get_value();
        spawn_local(async move {
            hooks::auth::register(ctx, payload, photo).await;
            set_is_submitting.set(false);
        });
    };

    let go_login = move |ev: leptos::web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate("/login");
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <BookOpen attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Join BookWorm"</h1>
                        <p class="text-base-content/70">
                            "Create an account and start building your shelves"
                        </p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <div class="form-control">
                            <label class="label" for="name">
                                <span class="label-text">"Name"</span>
                            </label>
                            <input
                                id="name"
                                type="text"
                                placeholder="Ada Lovelace"
                                on:input=move |ev| set_name.set(event_target_value(&ev))
                                prop:value=name
                                class="input input-bordered"
                            />
                            <FieldError errors=errors field="name" />
                        </div>
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
                            <span class="label-text-alt text-base-content/60 mt-1">
                                "8-20 characters with an uppercase letter, a digit and a special character"
                            </span>
                            <FieldError errors=errors field="password" />
                        </div>
                        <div class="form-control">
                            <label class="label" for="photo">
                                <span class="label-text">"Profile photo"</span>
                            </label>
                            <input
                                id="photo"
                                type="file"
                                accept="image/*"
                                on:change=on_photo_change
                                class="file-input file-input-bordered w-full"
                            />
                            <FieldError errors=errors field="photo" />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating account..." }.into_any()
                                } else {
                                    "Sign Up".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm mt-2">
                            "Already have an account? "
                            <a href="/login" class="link link-primary" on:click=go_login>
                                "Sign in"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
