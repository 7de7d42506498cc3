use bookworm_shared::date::format_date;
use bookworm_shared::{Review, ReviewStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::icons::{MessageSquare, Trash2};
use crate::hooks::{self, use_hook_ctx};

#[component]
pub fn AdminReviewsPage() -> impl IntoView {
    let ctx = use_hook_ctx();
    let reviews = hooks::reviews::use_reviews(ctx);

    let confirm_open = RwSignal::new(false);
    let deleting = RwSignal::new(None::<Review>);

    let row_count = move || reviews.data.get().map(|rows| rows.len()).unwrap_or(0);

    let delete_message = Signal::derive(move || {
        deleting
            .get()
            .map(|review| {
                format!(
                    "Delete the review of \"{}\" by {}?",
                    review.book_title(),
                    review.reviewer_email()
                )
            })
            .unwrap_or_default()
    });
    let on_confirm_delete = move |_: ()| {
        let Some(review) = deleting.get_untracked() else {
            return;
        };
        spawn_local(async move {
            hooks::reviews::delete_review(ctx, review.id).await;
        });
    };

    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold flex items-center gap-2">
                <MessageSquare attr:class="h-6 w-6 text-primary" /> "Reviews"
            </h1>

            {move || reviews.error.get().map(|message| view! {
                <div class="alert alert-error">{message}</div>
            })}

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Reviewer"</th>
                                    <th>"Book"</th>
                                    <th>"Rating"</th>
                                    <th>"Status"</th>
                                    <th class="hidden md:table-cell">"Date"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || row_count() == 0 && !reviews.loading.get()>
                                    <tr>
                                        <td colspan="6" class="text-center py-8 text-base-content/50">
                                            "No reviews submitted yet."
                                        </td>
                                    </tr>
                                </Show>
                                <Show when=move || reviews.loading.get() && row_count() == 0>
                                    <tr>
                                        <td colspan="6" class="text-center py-8 text-base-content/50">
                                            <span class="loading loading-spinner loading-md"></span>
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=move || reviews.data.get().unwrap_or_default()
                                    key=|review| review.id.clone()
                                    children=move |review: Review| {
                                        let delete_target = review.clone();
                                        let on_delete = move |_| {
                                            deleting.set(Some(delete_target.clone()));
                                            confirm_open.set(true);
                                        };
                                        let status_badge = match review.status {
                                            ReviewStatus::Pending => "badge badge-warning badge-sm",
                                            ReviewStatus::Approved => "badge badge-success badge-sm",
                                        };
                                        view! {
                                            <tr>
                                                <td class="text-sm">{review.reviewer_email().to_string()}</td>
                                                <td class="font-semibold">{review.book_title().to_string()}</td>
                                                <td>{format!("{:.1}", review.rating)}</td>
                                                <td>
                                                    <span class=status_badge>{review.status.label()}</span>
                                                </td>
                                                <td class="hidden md:table-cell text-sm text-base-content/70">
                                                    {format_date(&review.created_at)}
                                                </td>
                                                <td>
                                                    <div class="flex justify-end">
                                                        <button class="btn btn-ghost btn-sm btn-square text-error" on:click=on_delete>
                                                            <Trash2 attr:class="h-4 w-4" />
                                                        </button>
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

            <ConfirmDialog
                open=confirm_open
                title="Delete Review"
                message=delete_message
                on_confirm=on_confirm_delete
            />
        </div>
    }
}
