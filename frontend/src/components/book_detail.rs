use bookworm_shared::date::format_date;
use bookworm_shared::protocol::TogglePayload;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::add_review_dialog::AddReviewDialog;
use crate::components::icons::{Bookmark, ChevronLeft, MessageSquare};
use crate::components::rating::RatingStars;
use crate::hooks::{self, use_hook_ctx};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn BookDetailPage(id: String) -> impl IntoView {
    let ctx = use_hook_ctx();
    let session = ctx.session;
    let router = use_router();
    let detail = hooks::books::use_book_detail(ctx, id.clone());
    let (is_toggling, set_is_toggling) = signal(false);

    let on_toggle = move |_| {
        let Some(user) = session.user_id() else {
            return;
        };
        let Some(current) = detail.data.get() else {
            return;
        };
        let payload = TogglePayload {
            user,
            book: current.book.id.clone(),
        };
        set_is_toggling.set(true);
        spawn_local(async move {
            // 成功后书目详情缓存过期，按钮文案随刷新的 user_shelves 翻转
            hooks::shelves::toggle_shelve(ctx, payload).await;
            set_is_toggling.set(false);
        });
    };

    view! {
        <div class="space-y-6">
            <button
                class="btn btn-ghost btn-sm gap-2"
                on:click=move |_| router.navigate_route(AppRoute::Browse)
            >
                <ChevronLeft attr:class="h-4 w-4" /> "Back to Browse"
            </button>

            {move || match (detail.data.get(), detail.error.get()) {
                (_, Some(message)) => view! {
                    <div class="alert alert-error">{message}</div>
                }.into_any(),
                (None, None) => view! {
                    <div class="grid place-items-center py-24">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }.into_any(),
                (Some(current), None) => {
                    let book = current.book;
                    let on_shelf = session
                        .user
                        .get()
                        .map(|user| book.is_shelved_by(&user.id))
                        .unwrap_or(false);
                    let counts = book.shelf_count;
                    view! {
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body lg:flex-row gap-8">
                                <figure class="w-full lg:w-64 shrink-0 h-80 bg-base-200 rounded-box overflow-hidden">
                                    {if book.cover_image.is_empty() {
                                        view! {
                                            <div class="grid place-items-center w-full h-full text-base-content/30">
                                                "No cover"
                                            </div>
                                        }.into_any()
                                    } else {
                                        view! {
                                            <img
                                                src=book.cover_image.clone()
                                                alt=book.title.clone()
                                                class="object-cover w-full h-full"
                                            />
                                        }.into_any()
                                    }}
                                </figure>
                                <div class="flex-1 space-y-3">
                                    <h1 class="text-3xl font-bold">{book.title.clone()}</h1>
                                    <p class="text-lg text-base-content/70">{book.author.clone()}</p>
                                    <div class="flex items-center gap-3">
                                        <span class="badge badge-outline">{book.genre_name().to_string()}</span>
                                        <RatingStars rating=book.avg_rating count=book.total_reviews />
                                    </div>
                                    <div class="flex flex-wrap gap-2 text-sm">
                                        <span class="badge badge-ghost">
                                            {format!("{} want to read", counts.want_to_read)}
                                        </span>
                                        <span class="badge badge-ghost">
                                            {format!("{} reading", counts.currently_reading)}
                                        </span>
                                        <span class="badge badge-ghost">
                                            {format!("{} read", counts.read)}
                                        </span>
                                        <span class="badge badge-ghost">
                                            {format!("{} pages", book.total_pages)}
                                        </span>
                                    </div>
                                    <p class="text-base-content/80">{book.description.clone()}</p>
                                    <button
                                        class=move || {
                                            if on_shelf {
                                                "btn btn-outline gap-2"
                                            } else {
                                                "btn btn-primary gap-2"
                                            }
                                        }
                                        disabled=move || is_toggling.get()
                                        on:click=on_toggle
                                    >
                                        <Bookmark attr:class="h-4 w-4" />
                                        {if on_shelf { "Remove from Shelf" } else { "Want to Read" }}
                                    </button>
                                </div>
                            </div>
                        </div>
                    }.into_any()
                }
            }}

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <div class="flex items-center justify-between">
                        <h2 class="card-title">
                            <MessageSquare attr:class="h-5 w-5" /> "Reviews"
                        </h2>
                        <AddReviewDialog book_id=id.clone() />
                    </div>
                    {move || match detail.data.get() {
                        None => ().into_any(),
                        Some(current) if current.reviews.is_empty() => view! {
                            <div class="text-center py-8 text-base-content/50">
                                "No reviews yet. Be the first to share your thoughts!"
                            </div>
                        }.into_any(),
                        Some(current) => current
                            .reviews
                            .iter()
                            .map(|review| {
                                view! {
                                    <div class="border-b border-base-200 py-4 last:border-0">
                                        <div class="flex items-center justify-between">
                                            <span class="font-semibold">
                                                {review.reviewer_name().to_string()}
                                            </span>
                                            <span class="text-sm text-base-content/50">
                                                {format_date(&review.created_at)}
                                            </span>
                                        </div>
                                        <RatingStars rating=review.rating />
                                        <p class="text-sm mt-1">{review.comment.clone()}</p>
                                    </div>
                                }
                            })
                            .collect_view()
                            .into_any(),
                    }}
                </div>
            </div>
        </div>
    }
}
