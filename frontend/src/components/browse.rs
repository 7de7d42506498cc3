use bookworm_shared::protocol::{BookFilters, BookSortKey, SortOrder, DEFAULT_PAGE_LIMIT};
use leptos::prelude::*;

use crate::components::book_card::BookCard;
use crate::components::icons::{ChevronLeft, ChevronRight, Search};
use crate::hooks::{self, use_hook_ctx};
use crate::web::timer::Timeout;

/// 搜索防抖间隔
const SEARCH_DEBOUNCE_MS: u32 = 500;

#[component]
pub fn BrowsePage() -> impl IntoView {
    let ctx = use_hook_ctx();

    // 筛选状态；search_input 即时回显，search_term 防抖后才进入请求
    let search_input = RwSignal::new(String::new());
    let search_term = RwSignal::new(String::new());
    let selected_genres = RwSignal::new(Vec::<String>::new());
    let min_rating = RwSignal::new(None::<f64>);
    let max_rating = RwSignal::new(None::<f64>);
    let sort_by = RwSignal::new(BookSortKey::CreatedAt);
    let sort_order = RwSignal::new(SortOrder::Desc);
    let page = RwSignal::new(1_u32);

    // 定时器持有 JS 闭包，线程本地存放；新定时器落座即取消旧的
    let debounce = StoredValue::new_local(None::<Timeout>);

    let filters = Signal::derive(move || BookFilters {
        search_term: search_term.get(),
        genres: selected_genres.get(),
        min_rating: min_rating.get(),
        max_rating: max_rating.get(),
        sort_by: Some(sort_by.get()),
        sort_order: Some(sort_order.get()),
        page: Some(page.get()),
        limit: Some(DEFAULT_PAGE_LIMIT),
    });

    let books = hooks::books::use_book_list(ctx, filters);
    let genres = hooks::genres::use_genres(ctx);

    let on_search = move |ev: leptos::web_sys::Event| {
        let value = event_target_value(&ev);
        search_input.set(value.clone());
        let timeout = Timeout::new(SEARCH_DEBOUNCE_MS, move || {
            search_term.set(value.clone());
            page.set(1);
        });
        debounce.set_value(Some(timeout));
    };

    let on_min_rating = move |ev: leptos::web_sys::Event| {
        min_rating.set(event_target_value(&ev).parse::<f64>().ok());
        page.set(1);
    };
    let on_max_rating = move |ev: leptos::web_sys::Event| {
        max_rating.set(event_target_value(&ev).parse::<f64>().ok());
        page.set(1);
    };
    let on_sort_by = move |ev: leptos::web_sys::Event| {
        sort_by.set(BookSortKey::parse(&event_target_value(&ev)).unwrap_or_default());
        page.set(1);
    };
    let on_sort_order = move |ev: leptos::web_sys::Event| {
        let order = match event_target_value(&ev).as_str() {
            "asc" => SortOrder::Asc,
            _ => SortOrder::Desc,
        };
        sort_order.set(order);
        page.set(1);
    };

    let active_filters = move || {
        let mut count = selected_genres.get().len();
        if !search_term.get().trim().is_empty() {
            count += 1;
        }
        if min_rating.get().is_some() {
            count += 1;
        }
        if max_rating.get().is_some() {
            count += 1;
        }
        count
    };

    let clear_filters = move |_| {
        search_input.set(String::new());
        search_term.set(String::new());
        selected_genres.set(Vec::new());
        min_rating.set(None);
        max_rating.set(None);
        page.set(1);
    };

    let total_pages = move || {
        books
            .data
            .get()
            .map(|list| list.meta.total_pages)
            .unwrap_or(0)
    };
    let total_books = move || books.data.get().map(|list| list.meta.total).unwrap_or(0);

    let prev_page = move |_| {
        if page.get() > 1 {
            page.update(|p| *p -= 1);
        }
    };
    let next_page = move |_: leptos::web_sys::MouseEvent| {
        if page.get() < total_pages() {
            page.update(|p| *p += 1);
        }
    };

    view! {
        <div class="flex flex-col lg:flex-row gap-6">
            // 筛选侧栏
            <aside class="w-full lg:w-64 shrink-0">
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-4 gap-4">
                        <div class="flex items-center justify-between">
                            <h2 class="card-title text-base">"Filters"</h2>
                            <Show when=move || { active_filters() > 0 }>
                                <button class="btn btn-ghost btn-xs" on:click=clear_filters>
                                    {move || format!("Clear ({})", active_filters())}
                                </button>
                            </Show>
                        </div>

                        <label class="input input-bordered input-sm flex items-center gap-2">
                            <Search attr:class="h-4 w-4 text-base-content/50" />
                            <input
                                type="text"
                                class="grow"
                                placeholder="Search title or author"
                                prop:value=search_input
                                on:input=on_search
                            />
                        </label>

                        <div>
                            <div class="font-semibold text-sm mb-1">"Genres"</div>
                            <For
                                each=move || genres.data.get().unwrap_or_default()
                                key=|genre| genre.id.clone()
                                children=move |genre| {
                                    let id = genre.id.clone();
                                    let checked = {
                                        let id = id.clone();
                                        move || selected_genres.get().iter().any(|g| g == &id)
                                    };
                                    let on_toggle = move |_| {
                                        selected_genres.update(|list| {
                                            if let Some(pos) = list.iter().position(|g| g == &id) {
                                                list.remove(pos);
                                            } else {
                                                list.push(id.clone());
                                            }
                                        });
                                        page.set(1);
                                    };
                                    view! {
                                        <label class="label cursor-pointer justify-start gap-2 py-1">
                                            <input
                                                type="checkbox"
                                                class="checkbox checkbox-sm checkbox-primary"
                                                prop:checked=checked
                                                on:change=on_toggle
                                            />
                                            <span class="label-text">{genre.name.clone()}</span>
                                        </label>
                                    }
                                }
                            />
                        </div>

                        <div class="grid grid-cols-2 gap-2">
                            <div>
                                <div class="font-semibold text-sm mb-1">"Min rating"</div>
                                <select class="select select-bordered select-sm w-full" on:change=on_min_rating>
                                    <option value="" selected=move || min_rating.get().is_none()>"Any"</option>
                                    <option value="1">"1+"</option>
                                    <option value="2">"2+"</option>
                                    <option value="3">"3+"</option>
                                    <option value="4">"4+"</option>
                                </select>
                            </div>
                            <div>
                                <div class="font-semibold text-sm mb-1">"Max rating"</div>
                                <select class="select select-bordered select-sm w-full" on:change=on_max_rating>
                                    <option value="" selected=move || max_rating.get().is_none()>"Any"</option>
                                    <option value="2">"2"</option>
                                    <option value="3">"3"</option>
                                    <option value="4">"4"</option>
                                    <option value="5">"5"</option>
                                </select>
                            </div>
                        </div>

                        <div class="grid grid-cols-2 gap-2">
                            <div>
                                <div class="font-semibold text-sm mb-1">"Sort by"</div>
                                <select class="select select-bordered select-sm w-full" on:change=on_sort_by>
                                    <option value="createdAt">"Date added"</option>
                                    <option value="title">"Title"</option>
                                    <option value="rating">"Rating"</option>
                                    <option value="shelved">"Most shelved"</option>
                                </select>
                            </div>
                            <div>
                                <div class="font-semibold text-sm mb-1">"Order"</div>
                                <select class="select select-bordered select-sm w-full" on:change=on_sort_order>
                                    <option value="desc">"Descending"</option>
                                    <option value="asc">"Ascending"</option>
                                </select>
                            </div>
                        </div>
                    </div>
                </div>
            </aside>

            // 结果区
            <div class="flex-1">
                <div class="flex items-center justify-between mb-4">
                    <h1 class="text-2xl font-bold">"Browse Books"</h1>
                    <span class="text-sm text-base-content/70">
                        {move || format!("{} books found", total_books())}
                    </span>
                </div>

                {move || match (books.data.get(), books.error.get()) {
                    (_, Some(message)) => view! {
                        <div class="alert alert-error">{message}</div>
                    }.into_any(),
                    (None, None) => view! {
                        <div class="grid place-items-center py-24">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }.into_any(),
                    (Some(list), None) if list.data.is_empty() => view! {
                        <div class="text-center py-24 text-base-content/50">
                            "No books match your filters."
                        </div>
                    }.into_any(),
                    (Some(list), None) => view! {
                        <div class="grid grid-cols-1 sm:grid-cols-2 xl:grid-cols-3 gap-6">
                            {list
                                .data
                                .into_iter()
                                .map(|book| view! { <BookCard book=book /> })
                                .collect_view()}
                        </div>
                    }.into_any(),
                }}

                <Show when=move || { total_pages() > 1 }>
                    <div class="flex justify-center mt-8">
                        <div class="join">
                            <button
                                class="join-item btn btn-sm"
                                disabled=move || page.get() <= 1
                                on:click=prev_page
                            >
                                <ChevronLeft attr:class="h-4 w-4" />
                            </button>
                            {move || {
                                (1..=total_pages())
                                    .map(|n| {
                                        view! {
                                            <button
                                                class="join-item btn btn-sm"
                                                class:btn-active=move || page.get() == n
                                                on:click=move |_| page.set(n)
                                            >
                                                {n}
                                            </button>
                                        }
                                    })
                                    .collect_view()
                            }}
                            <button
                                class="join-item btn btn-sm"
                                disabled=move || { page.get() >= total_pages() }
                                on:click=next_page
                            >
                                <ChevronRight attr:class="h-4 w-4" />
                            </button>
                        </div>
                    </div>
                </Show>
            </div>
        </div>
    }
}
