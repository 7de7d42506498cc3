use bookworm_shared::Book;
use leptos::prelude::*;

use crate::components::icons::Bookmark;
use crate::components::rating::RatingStars;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// Catalogue card. Clicking anywhere on it opens the book's detail page.
#[component]
pub fn BookCard(book: Book) -> impl IntoView {
    let router = use_router();
    let id = book.id.clone();
    let genre = book.genre_name().to_string();
    let shelved = book.shelf_count.total();

    view! {
        <div
            class="card bg-base-100 shadow-xl hover:shadow-2xl transition-shadow cursor-pointer"
            on:click=move |_| router.navigate_route(AppRoute::BookDetail(id.clone()))
        >
            <figure class="h-56 bg-base-200">
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
            <div class="card-body p-4">
                <h3 class="card-title text-base line-clamp-1">{book.title.clone()}</h3>
                <p class="text-sm text-base-content/70">{book.author.clone()}</p>
                <div class="flex items-center justify-between mt-2">
                    <span class="badge badge-outline badge-sm">{genre}</span>
                    <span class="flex items-center gap-1 text-sm text-base-content/70">
                        <Bookmark attr:class="h-4 w-4" /> {shelved}
                    </span>
                </div>
                <RatingStars rating=book.avg_rating count=book.total_reviews />
            </div>
        </div>
    }
}
