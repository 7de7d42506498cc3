use bookworm_shared::protocol::ReviewPayload;
use bookworm_shared::validate::{validate_review, FieldErrors};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::fields::FieldError;
use crate::components::icons::Plus;
use crate::hooks::{self, use_hook_ctx};

#[component]
pub fn AddReviewDialog(book_id: String) -> impl IntoView {
    let ctx = use_hook_ctx();
    let session = ctx.session;

    let (open, set_open) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    let rating = RwSignal::new(5.0_f64);
    let comment = RwSignal::new(String::new());
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
        let value = rating.get();
        let text = comment.get();
        if let Err(errs) = validate_review(value, &text) {
            errors.set(errs);
            return;
        }
        errors.set(FieldErrors::new());
        let Some(user) = session.user_id() else {
            return;
        };
        let payload = ReviewPayload {
            user,
            book: book_id.clone(),
            rating: value,
            comment: text.trim().to_string(),
        };
        set_is_submitting.set(true);
        spawn_local(async move {
            if hooks::reviews::create_review(ctx, payload).await {
                set_open.set(false);
                rating.set(5.0);
                comment.set(String::new());
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <button class="btn btn-primary btn-sm gap-2" on:click=move |_| set_open.set(true)>
            <Plus attr:class="h-4 w-4" /> "Write a Review"
        </button>

        <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Write a Review"</h3>
                <p class="py-2 text-base-content/70">
                    "New reviews are published once a moderator approves them."
                </p>

                <form on:submit=on_submit class="space-y-4">
                    <div class="form-control">
                        <label class="label">
                            <span class="label-text">"Rating"</span>
                        </label>
                        <select
                            class="select select-bordered w-full"
                            on:change=move |ev| {
                                rating.set(event_target_value(&ev).parse().unwrap_or(5.0));
                            }
                        >
                            {(1..=10u32)
                                .rev()
                                .map(|n| {
                                    let value = n as f64 / 2.0;
                                    view! {
                                        <option
                                            value=format!("{value}")
                                            selected=move || rating.get() == value
                                        >
                                            {format!("{value} stars")}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                        <FieldError errors=errors field="rating" />
                    </div>

                    <div class="form-control">
                        <label class="label">
                            <span class="label-text">"Comment"</span>
                        </label>
                        <textarea
                            class="textarea textarea-bordered w-full"
                            rows="4"
                            placeholder="What did you think of this book?"
                            prop:value=comment
                            on:input=move |ev| comment.set(event_target_value(&ev))
                        ></textarea>
                        <FieldError errors=errors field="comment" />
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
                                    view! { "Submit Review" }.into_any()
                                }
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </dialog>
    }
}
