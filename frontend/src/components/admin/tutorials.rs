use bookworm_shared::protocol::TutorialPayload;
use bookworm_shared::validate::{validate_tutorial, FieldErrors};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::fields::FieldError;
use crate::components::icons::{Plus, Video};
use crate::hooks::{self, use_hook_ctx};

#[component]
pub fn AdminTutorialsPage() -> impl IntoView {
    let ctx = use_hook_ctx();
    let tutorials = hooks::tutorials::use_tutorials(ctx);

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold flex items-center gap-2">
                    <Video attr:class="h-6 w-6 text-primary" /> "Tutorials"
                </h1>
                <AddTutorialDialog />
            </div>

            {move || match (tutorials.data.get(), tutorials.error.get()) {
                (_, Some(message)) => view! {
                    <div class="alert alert-error">{message}</div>
                }.into_any(),
                (None, None) => view! {
                    <div class="grid place-items-center py-24">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }.into_any(),
                (Some(rows), None) if rows.is_empty() => view! {
                    <div class="text-center py-24 text-base-content/50">
                        "No tutorials yet. Share a video to help readers get started."
                    </div>
                }.into_any(),
                (Some(rows), None) => view! {
                    <div class="grid grid-cols-1 md:grid-cols-2 xl:grid-cols-3 gap-6">
                        {rows
                            .into_iter()
                            .map(|tutorial| {
                                let embed = tutorial.embed_url();
                                view! {
                                    <div class="card bg-base-100 shadow-xl">
                                        <figure class="aspect-video">
                                            <iframe
                                                src=embed
                                                title=tutorial.title.clone()
                                                class="w-full h-full"
                                                allowfullscreen=true
                                            ></iframe>
                                        </figure>
                                        <div class="card-body p-4">
                                            <h3 class="card-title text-base">
                                                {tutorial.title.clone()}
                                            </h3>
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                }.into_any(),
            }}
        </div>
    }
}

/// 发布教程的小表单；只收标题和视频地址
#[component]
fn AddTutorialDialog() -> impl IntoView {
    let ctx = use_hook_ctx();
    let (open, set_open) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    let title = RwSignal::new(String::new());
    let youtube_url = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let entered_title = title.get();
        let entered_url = youtube_url.get();
        if let Err(found) = validate_tutorial(&entered_title, &entered_url) {
            errors.set(found);
            return;
        }
        errors.set(FieldErrors::new());
        let payload = TutorialPayload {
            title: entered_title.trim().to_string(),
            youtube_url: entered_url.trim().to_string(),
        };
        set_is_submitting.set(true);
        spawn_local(async move {
            if hooks::tutorials::create_tutorial(ctx, payload).await {
                set_open.set(false);
                title.set(String::new());
                youtube_url.set(String::new());
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <button class="btn btn-primary gap-2" on:click=move |_| set_open.set(true)>
            <Plus attr:class="h-4 w-4" /> "Add Tutorial"
        </button>

        <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Add Tutorial"</h3>

                <form on:submit=on_submit class="space-y-4 mt-4">
                    <div class="form-control">
                        <label class="label">
                            <span class="label-text">"Title"</span>
                        </label>
                        <input
                            type="text"
                            class="input input-bordered w-full"
                            placeholder="How to track your reading"
                            prop:value=title
                            on:input=move |ev| title.set(event_target_value(&ev))
                        />
                        <FieldError errors=errors field="title" />
                    </div>
                    <div class="form-control">
                        <label class="label">
                            <span class="label-text">"YouTube URL"</span>
                        </label>
                        <input
                            type="text"
                            class="input input-bordered w-full"
                            placeholder="https://www.youtube.com/watch?v=..."
                            prop:value=youtube_url
                            on:input=move |ev| youtube_url.set(event_target_value(&ev))
                        />
                        <FieldError errors=errors field="youtubeUrl" />
                    </div>

                    <div class="modal-action">
                        <button
                            type="button"
                            class="btn btn-ghost"
                            on:click=move |_| set_open.set(false)
                        >
                            "Cancel"
                        </button>
                        <button
                            type="submit"
                            class="btn btn-primary"
                            disabled=move || is_submitting.get()
                        >
                            {move || {
                                if is_submitting.get() {
                                    view! {
                                        <span class="loading loading-spinner loading-sm"></span>
                                    }.into_any()
                                } else {
                                    view! { "Publish" }.into_any()
                                }
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </dialog>
    }
}
