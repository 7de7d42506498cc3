use bookworm_shared::date::format_date;
use bookworm_shared::stats::shelf_counts;
use bookworm_shared::{ShelfState, Shelve};
use leptos::prelude::*;

use crate::hooks::{self, use_hook_ctx};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn LibraryPage() -> impl IntoView {
    let ctx = use_hook_ctx();
    let shelves = hooks::shelves::use_my_shelves(ctx);
    let active_tab = RwSignal::new(ShelfState::WantToRead);

    let counts = Signal::derive(move || {
        shelves
            .data
            .get()
            .map(|rows| shelf_counts(&rows))
            .unwrap_or_default()
    });

    let visible = move || {
        shelves
            .data
            .get()
            .unwrap_or_default()
            .into_iter()
            .filter(|row| row.shelve == active_tab.get())
            .collect::<Vec<_>>()
    };

    let tab = move |state: ShelfState, count: fn(bookworm_shared::ShelfCount) -> u32| {
        view! {
            <a
                role="tab"
                class="tab"
                class:tab-active=move || active_tab.get() == state
                on:click=move |_| active_tab.set(state)
            >
                {move || format!("{} ({})", state.label(), count(counts.get()))}
            </a>
        }
    };

    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold">"My Library"</h1>

            <div role="tablist" class="tabs tabs-boxed w-fit">
                {tab(ShelfState::WantToRead, |c| c.want_to_read)}
                {tab(ShelfState::CurrentlyReading, |c| c.currently_reading)}
                {tab(ShelfState::Read, |c| c.read)}
            </div>

            {move || match (shelves.data.get(), shelves.error.get()) {
                (_, Some(message)) => view! {
                    <div class="alert alert-error">{message}</div>
                }.into_any(),
                (None, None) => view! {
                    <div class="grid place-items-center py-24">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }.into_any(),
                (Some(_), None) => {
                    let rows = visible();
                    if rows.is_empty() {
                        view! {
                            <div class="text-center py-24 text-base-content/50">
                                "Nothing on this shelf yet."
                            </div>
                        }.into_any()
                    } else {
                        view! {
                            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                                {rows
                                    .into_iter()
                                    .map(|row| view! { <ShelfCard row=row /> })
                                    .collect_view()}
                            </div>
                        }.into_any()
                    }
                }
            }}
        </div>
    }
}

/// 单条书架记录卡片；按书架状态展示进度条/完成日期/加入日期
#[component]
fn ShelfCard(row: Shelve) -> impl IntoView {
    let router = use_router();
    let title = row.book_title().to_string();
    let book = row.book.as_ref().and_then(|book| book.as_book()).cloned();
    let book_id = row.book.as_ref().map(|book| book.id().to_string());
    let percent = row.progress_percent();
    let total_pages = book.as_ref().map(|book| book.total_pages).unwrap_or(0);

    let status = match row.shelve {
        ShelfState::CurrentlyReading => view! {
            <div class="mt-2">
                <progress class="progress progress-primary w-full" value=percent max=100></progress>
                <span class="text-xs text-base-content/60">
                    {format!("{} of {} pages ({percent}%)", row.progress_pages, total_pages)}
                </span>
            </div>
        }
        .into_any(),
        ShelfState::Read => view! {
            <span class="text-sm text-success mt-2">
                {row
                    .finished_at
                    .map(|ts| format!("Finished {}", format_date(&ts)))
                    .unwrap_or_else(|| "Finished".into())}
            </span>
        }
        .into_any(),
        ShelfState::WantToRead => view! {
            <span class="text-sm text-base-content/50 mt-2">
                {format!("Added {}", format_date(&row.created_at))}
            </span>
        }
        .into_any(),
    };

    view! {
        <div class="card card-side bg-base-100 shadow-xl">
            <figure class="w-24 bg-base-200 shrink-0">
                {match book.as_ref().map(|book| book.cover_image.clone()) {
                    Some(cover) if !cover.is_empty() => view! {
                        <img src=cover alt=title.clone() class="object-cover w-full h-full" />
                    }.into_any(),
                    _ => view! {
                        <div class="grid place-items-center w-full h-full text-base-content/30 text-xs">
                            "No cover"
                        </div>
                    }.into_any(),
                }}
            </figure>
            <div class="card-body p-4">
                <h3 class="card-title text-base">{title.clone()}</h3>
                {book
                    .as_ref()
                    .map(|book| view! { <p class="text-sm text-base-content/70">{book.author.clone()}</p> })}
                {status}
                {book_id.map(|id| view! {
                    <div class="card-actions justify-end">
                        <button
                            class="btn btn-ghost btn-sm"
                            on:click=move |_| router.navigate_route(AppRoute::BookDetail(id.clone()))
                        >
                            "View"
                        </button>
                    </div>
                })}
            </div>
        </div>
    }
}
