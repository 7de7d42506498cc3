use bookworm_shared::stats::reading_stats;
use chrono::Utc;
use leptos::prelude::*;

use crate::components::book_card::BookCard;
use crate::components::icons::{BookOpen, Bookmark, Sparkles, Target, TrendingUp};
use crate::hooks::{self, use_hook_ctx};

#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = use_hook_ctx();
    let session = ctx.session;
    let shelves = hooks::shelves::use_my_shelves(ctx);
    let recommended = hooks::books::use_recommended_books(ctx);

    let stats = Signal::derive(move || {
        shelves
            .data
            .get()
            .map(|rows| reading_stats(&rows, &Utc::now()))
            .unwrap_or_default()
    });
    let goal = move || session.user.get().and_then(|user| user.reading_goal);

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-2xl font-bold">
                    {move || {
                        let name = session.user.get().map(|user| user.name).unwrap_or_default();
                        format!("Welcome back, {name}!")
                    }}
                </h1>
                <p class="text-base-content/70">"Here is how your reading is going."</p>
            </div>

            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                <div class="stat">
                    <div class="stat-figure text-primary">
                        <BookOpen attr:class="h-8 w-8" />
                    </div>
                    <div class="stat-title">"Books Read"</div>
                    <div class="stat-value text-primary">{move || stats.get().read}</div>
                    <div class="stat-desc">
                        {move || format!("{} this year", stats.get().read_this_year)}
                    </div>
                </div>
                <div class="stat">
                    <div class="stat-figure text-secondary">
                        <TrendingUp attr:class="h-8 w-8" />
                    </div>
                    <div class="stat-title">"Pages Read"</div>
                    <div class="stat-value text-secondary">
                        {move || stats.get().total_pages_read}
                    </div>
                    <div class="stat-desc">"Across finished books"</div>
                </div>
                <div class="stat">
                    <div class="stat-figure text-accent">
                        <Bookmark attr:class="h-8 w-8" />
                    </div>
                    <div class="stat-title">"On Your Shelves"</div>
                    <div class="stat-value text-accent">
                        {move || {
                            let s = stats.get();
                            s.currently_reading + s.want_to_read
                        }}
                    </div>
                    <div class="stat-desc">
                        {move || {
                            let s = stats.get();
                            format!("{} reading, {} queued", s.currently_reading, s.want_to_read)
                        }}
                    </div>
                </div>
                <div class="stat">
                    <div class="stat-figure text-warning">
                        <Sparkles attr:class="h-8 w-8" />
                    </div>
                    <div class="stat-title">"Favorite Genre"</div>
                    <div class="stat-value text-lg">
                        {move || stats.get().favorite_genre.unwrap_or_else(|| "-".into())}
                    </div>
                    <div class="stat-desc">"By finished books"</div>
                </div>
            </div>

            <Show when=move || goal().is_some()>
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h2 class="card-title">
                            <Target attr:class="h-5 w-5 text-primary" />
                            {move || {
                                goal()
                                    .map(|g| format!("{} Reading Goal", g.year))
                                    .unwrap_or_default()
                            }}
                        </h2>
                        <progress
                            class="progress progress-primary w-full"
                            value=move || stats.get().read_this_year
                            max=move || goal().map(|g| g.target_books).unwrap_or(1)
                        ></progress>
                        <p class="text-sm text-base-content/70">
                            {move || {
                                let target = goal().map(|g| g.target_books).unwrap_or(0);
                                format!("{} of {} books finished", stats.get().read_this_year, target)
                            }}
                        </p>
                    </div>
                </div>
            </Show>

            <div>
                <h2 class="text-xl font-bold mb-4 flex items-center gap-2">
                    <Sparkles attr:class="h-5 w-5 text-warning" /> "Recommended for You"
                </h2>
                {move || match (recommended.data.get(), recommended.error.get()) {
                    (_, Some(message)) => view! {
                        <div class="alert alert-error">{message}</div>
                    }.into_any(),
                    (None, None) => view! {
                        <div class="grid place-items-center py-12">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }.into_any(),
                    (Some(books), None) if books.is_empty() => view! {
                        <div class="text-center py-12 text-base-content/50">
                            "Nothing to recommend yet. Start shelving books!"
                        </div>
                    }.into_any(),
                    (Some(books), None) => view! {
                        <div class="grid grid-cols-1 sm:grid-cols-2 xl:grid-cols-3 gap-6">
                            {books
                                .into_iter()
                                .map(|book| view! { <BookCard book=book /> })
                                .collect_view()}
                        </div>
                    }.into_any(),
                }}
            </div>
        </div>
    }
}
