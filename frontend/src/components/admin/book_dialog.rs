use bookworm_shared::protocol::BookPayload;
use bookworm_shared::validate::{validate_book, BookDraft, FieldErrors};
use bookworm_shared::Book;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::fields::FieldError;
use crate::hooks::{self, use_hook_ctx};

/// 新建/编辑书籍的模态表单。`editing` 为 None 时是新建，
/// 此时封面必填；编辑时留空表示保持原封面。
#[component]
pub fn BookDialog(open: RwSignal<bool>, editing: RwSignal<Option<Book>>) -> impl IntoView {
    let ctx = use_hook_ctx();
    let genres = hooks::genres::use_genres(ctx);

    let (is_submitting, set_is_submitting) = signal(false);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    let title = RwSignal::new(String::new());
    let author = RwSignal::new(String::new());
    let genre = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let total_pages = RwSignal::new(String::new());
    let (cover_size, set_cover_size) = signal(None::<u64>);
    let errors = RwSignal::new(FieldErrors::new());
    let cover_file = StoredValue::new_local(None::<web_sys::File>);

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

    // 每次打开时按编辑对象重置表单
    Effect::new(move |_| {
        if !open.get() {
            return;
        }
        match editing.get_untracked() {
            Some(book) => {
                title.set(book.title);
                author.set(book.author);
                genre.set(book.genre.id().to_string());
                description.set(book.description);
                total_pages.set(book.total_pages.to_string());
            }
            None => {
                title.set(String::new());
                author.set(String::new());
                genre.set(String::new());
                description.set(String::new());
                total_pages.set(String::new());
            }
        }
        set_cover_size.set(None);
        cover_file.set_value(None);
        errors.set(FieldErrors::new());
    });

    let on_cover_change = move |ev: leptos::web_sys::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let file = input.files().and_then(|files| files.get(0));
        set_cover_size.set(file.as_ref().map(|file| file.size() as u64));
        cover_file.set_value(file);
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = BookDraft {
            title: title.get(),
            author: author.get(),
            genre: genre.get(),
            description: description.get(),
            total_pages: total_pages.get(),
            cover_size: cover_size.get(),
        };
        let target = editing.get();
        if let Err(found) = validate_book(&draft, target.is_none()) {
            errors.set(found);
            return;
        }
        errors.set(FieldErrors::new());
        let payload = BookPayload {
            title: draft.title.trim().to_string(),
            author: draft.author.trim().to_string(),
            genre: draft.genre,
            description: draft.description.trim().to_string(),
            total_pages: draft.total_pages.trim().parse().unwrap_or(0),
        };
        set_is_submitting.set(true);

        let cover = cover_file.get_value();
        spawn_local(async move {
            let ok = match target {
                Some(book) => hooks::books::update_book(ctx, book.id, payload, cover).await,
                None => hooks::books::create_book(ctx, payload, cover).await,
            };
            if ok {
                open.set(false);
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| open.set(false)>
            <div class="modal-box max-w-2xl">
                <h3 class="font-bold text-lg">
                    {move || if editing.get().is_some() { "Edit Book" } else { "Add Book" }}
                </h3>

                <form on:submit=on_submit class="space-y-4 mt-4">
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"Title"</span>
                            </label>
                            <input
                                type="text"
                                class="input input-bordered w-full"
                                prop:value=title
                                on:input=move |ev| title.set(event_target_value(&ev))
                            />
                            <FieldError errors=errors field="title" />
                        </div>
                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"Author"</span>
                            </label>
                            <input
                                type="text"
                                class="input input-bordered w-full"
                                prop:value=author
                                on:input=move |ev| author.set(event_target_value(&ev))
                            />
                            <FieldError errors=errors field="author" />
                        </div>
                    </div>

                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"Genre"</span>
                            </label>
                            <select
                                class="select select-bordered w-full"
                                on:change=move |ev| genre.set(event_target_value(&ev))
                            >
                                <option value="" selected=move || genre.get().is_empty()>
                                    "Select a genre"
                                </option>
                                <For
                                    each=move || genres.data.get().unwrap_or_default()
                                    key=|row| row.id.clone()
                                    children=move |row| {
                                        let id = row.id.clone();
                                        let is_selected = {
                                            let id = id.clone();
                                            move || genre.get() == id
                                        };
                                        view! {
                                            <option value=id selected=is_selected>
                                                {row.name.clone()}
                                            </option>
                                        }
                                    }
                                />
                            </select>
                            <FieldError errors=errors field="genre" />
                        </div>
                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"Total pages"</span>
                            </label>
                            <input
                                type="number"
                                min="1"
                                class="input input-bordered w-full"
                                prop:value=total_pages
                                on:input=move |ev| total_pages.set(event_target_value(&ev))
                            />
                            <FieldError errors=errors field="totalPages" />
                        </div>
                    </div>

                    <div class="form-control">
                        <label class="label">
                            <span class="label-text">"Description"</span>
                        </label>
                        <textarea
                            class="textarea textarea-bordered w-full"
                            rows="3"
                            prop:value=description
                            on:input=move |ev| description.set(event_target_value(&ev))
                        ></textarea>
                        <FieldError errors=errors field="description" />
                    </div>

                    <div class="form-control">
                        <label class="label">
                            <span class="label-text">"Cover image"</span>
                        </label>
                        <input
                            type="file"
                            accept="image/*"
                            class="file-input file-input-bordered w-full"
                            on:change=on_cover_change
                        />
                        <label class="label">
                            <span class="label-text-alt text-base-content/60">
                                {move || {
                                    if editing.get().is_some() {
                                        "Up to 5 MB. Leave empty to keep the current cover."
                                    } else {
                                        "Up to 5 MB."
                                    }
                                }}
                            </span>
                        </label>
                        <FieldError errors=errors field="coverImage" />
                    </div>

                    <div class="modal-action">
                        <button
                            type="button"
                            class="btn btn-ghost"
                            on:click=move |_| open.set(false)
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
                                } else if editing.get().is_some() {
                                    view! { "Save Changes" }.into_any()
                                } else {
                                    view! { "Create Book" }.into_any()
                                }
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </dialog>
    }
}
