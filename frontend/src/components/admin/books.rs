use bookworm_shared::date::format_date;
use bookworm_shared::protocol::{BookFilters, BookSortKey, SortOrder};
use bookworm_shared::Book;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::book_dialog::BookDialog;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::icons::{ChevronLeft, ChevronRight, Pencil, Plus, Trash2};
use crate::hooks::{self, use_hook_ctx};

/// 后台列表每页行数
const PAGE_LIMIT: u32 = 10;

#[component]
pub fn AdminBooksPage() -> impl IntoView {
    let ctx = use_hook_ctx();
    let page = RwSignal::new(1_u32);
    let filters = Signal::derive(move || BookFilters {
        sort_by: Some(BookSortKey::CreatedAt),
        sort_order: Some(SortOrder::Desc),
        page: Some(page.get()),
        limit: Some(PAGE_LIMIT),
        ..BookFilters::default()
    });
    let books = hooks::books::use_book_list(ctx, filters);

    let dialog_open = RwSignal::new(false);
    let editing = RwSignal::new(None::<Book>);
    let confirm_open = RwSignal::new(false);
    let deleting = RwSignal::new(None::<Book>);

    let row_count = move || {
        books
            .data
            .get()
            .map(|list| list.data.len())
            .unwrap_or(0)
    };
    let total_pages = move || {
        books
            .data
            .get()
            .map(|list| list.meta.total_pages)
            .unwrap_or(0)
    };

    let on_add = move |_| {
        editing.set(None);
        dialog_open.set(true);
    };

    let delete_message = Signal::derive(move || {
        deleting
            .get()
            .map(|book| format!("Delete \"{}\"? This cannot be undone.", book.title))
            .unwrap_or_default()
    });
    let on_confirm_delete = move |_: ()| {
        let Some(book) = deleting.get_untracked() else {
            return;
        };
        spawn_local(async move {
            hooks::books::delete_book(ctx, book.id).await;
        });
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold">"Books"</h1>
                <button class="btn btn-primary gap-2" on:click=on_add>
                    <Plus attr:class="h-4 w-4" /> "Add Book"
                </button>
            </div>

            {move || books.error.get().map(|message| view! {
                <div class="alert alert-error">{message}</div>
            })}

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Title"</th>
                                    <th>"Author"</th>
                                    <th class="hidden md:table-cell">"Genre"</th>
                                    <th class="hidden md:table-cell">"Rating"</th>
                                    <th class="hidden md:table-cell">"Added"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || row_count() == 0 && !books.loading.get()>
                                    <tr>
                                        <td colspan="6" class="text-center py-8 text-base-content/50">
                                            "No books in the catalogue yet."
                                        </td>
                                    </tr>
                                </Show>
                                <Show when=move || books.loading.get() && row_count() == 0>
                                    <tr>
                                        <td colspan="6" class="text-center py-8 text-base-content/50">
                                            <span class="loading loading-spinner loading-md"></span>
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=move || books.data.get().map(|list| list.data).unwrap_or_default()
                                    key=|book| book.id.clone()
                                    children=move |book: Book| {
                                        let edit_target = book.clone();
                                        let delete_target = book.clone();
                                        let on_edit = move |_| {
                                            editing.set(Some(edit_target.clone()));
                                            dialog_open.set(true);
                                        };
                                        let on_delete = move |_| {
                                            deleting.set(Some(delete_target.clone()));
                                            confirm_open.set(true);
                                        };
                                        view! {
                                            <tr>
                                                <td>
                                                    <div class="flex items-center gap-3">
                                                        {if book.cover_image.is_empty() {
                                                            view! {
                                                                <div class="w-8 h-12 bg-base-200 rounded grid place-items-center text-[0.5rem] text-base-content/40">
                                                                    "n/a"
                                                                </div>
                                                            }.into_any()
                                                        } else {
                                                            view! {
                                                                <img
                                                                    src=book.cover_image.clone()
                                                                    alt=book.title.clone()
                                                                    class="w-8 h-12 object-cover rounded"
                                                                />
                                                            }.into_any()
                                                        }}
                                                        <span class="font-semibold">{book.title.clone()}</span>
                                                    </div>
                                                </td>
                                                <td>{book.author.clone()}</td>
                                                <td class="hidden md:table-cell">
                                                    <span class="badge badge-outline badge-sm">
                                                        {book.genre_name().to_string()}
                                                    </span>
                                                </td>
                                                <td class="hidden md:table-cell">
                                                    {format!("{:.1} ({})", book.avg_rating, book.total_reviews)}
                                                </td>
                                                <td class="hidden md:table-cell text-sm text-base-content/70">
                                                    {format_date(&book.created_at)}
                                                </td>
                                                <td>
                                                    <div class="flex gap-1 justify-end">
                                                        <button class="btn btn-ghost btn-sm btn-square" on:click=on_edit>
                                                            <Pencil attr:class="h-4 w-4" />
                                                        </button>
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

            <Show when=move || { total_pages() > 1 }>
                <div class="flex justify-center">
                    <div class="join">
                        <button
                            class="join-item btn btn-sm"
                            disabled=move || page.get() <= 1
                            on:click=move |_| {
                                if page.get() > 1 {
                                    page.update(|p| *p -= 1);
                                }
                            }
                        >
                            <ChevronLeft attr:class="h-4 w-4" />
                        </button>
                        <button class="join-item btn btn-sm no-animation">
                            {move || format!("Page {} of {}", page.get(), total_pages())}
                        </button>
                        <button
                            class="join-item btn btn-sm"
                            disabled=move || { page.get() >= total_pages() }
                            on:click=move |_| {
                                if page.get() < total_pages() {
                                    page.update(|p| *p += 1);
                                }
                            }
                        >
                            <ChevronRight attr:class="h-4 w-4" />
                        </button>
                    </div>
                </div>
            </Show>

            <BookDialog open=dialog_open editing=editing />
            <ConfirmDialog
                open=confirm_open
                title="Delete Book"
                message=delete_message
                on_confirm=on_confirm_delete
            />
        </div>
    }
}
