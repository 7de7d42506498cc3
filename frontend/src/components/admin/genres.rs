use bookworm_shared::date::format_date;
use bookworm_shared::protocol::GenrePayload;
use bookworm_shared::validate::{validate_genre, FieldErrors};
use bookworm_shared::Genre;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::fields::FieldError;
use crate::components::icons::{Pencil, Plus, Tag, Trash2};
use crate::hooks::{self, use_hook_ctx};

#[component]
pub fn AdminGenresPage() -> impl IntoView {
    let ctx = use_hook_ctx();
    let genres = hooks::genres::use_genres(ctx);

    let dialog_open = RwSignal::new(false);
    let editing = RwSignal::new(None::<Genre>);
    let confirm_open = RwSignal::new(false);
    let deleting = RwSignal::new(None::<Genre>);

    let row_count = move || genres.data.get().map(|rows| rows.len()).unwrap_or(0);

    let on_add = move |_| {
        editing.set(None);
        dialog_open.set(true);
    };

    let delete_message = Signal::derive(move || {
        deleting
            .get()
            .map(|genre| {
                format!(
                    "Delete \"{}\"? Books in this genre keep their reference.",
                    genre.name
                )
            })
            .unwrap_or_default()
    });
    let on_confirm_delete = move |_: ()| {
        let Some(genre) = deleting.get_untracked() else {
            return;
        };
        spawn_local(async move {
            hooks::genres::delete_genre(ctx, genre.id).await;
        });
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold flex items-center gap-2">
                    <Tag attr:class="h-6 w-6 text-primary" /> "Genres"
                </h1>
                <button class="btn btn-primary gap-2" on:click=on_add>
                    <Plus attr:class="h-4 w-4" /> "Add Genre"
                </button>
            </div>

            {move || genres.error.get().map(|message| view! {
                <div class="alert alert-error">{message}</div>
            })}

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Name"</th>
                                    <th>"Description"</th>
                                    <th class="hidden md:table-cell">"Created"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || row_count() == 0 && !genres.loading.get()>
                                    <tr>
                                        <td colspan="4" class="text-center py-8 text-base-content/50">
                                            "No genres yet. Add one to start organizing the catalogue."
                                        </td>
                                    </tr>
                                </Show>
                                <Show when=move || genres.loading.get() && row_count() == 0>
                                    <tr>
                                        <td colspan="4" class="text-center py-8 text-base-content/50">
                                            <span class="loading loading-spinner loading-md"></span>
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=move || genres.data.get().unwrap_or_default()
                                    key=|genre| genre.id.clone()
                                    children=move |genre: Genre| {
                                        let edit_target = genre.clone();
                                        let delete_target = genre.clone();
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
                                                <td class="font-semibold">{genre.name.clone()}</td>
                                                <td class="max-w-md truncate">{genre.description.clone()}</td>
                                                <td class="hidden md:table-cell text-sm text-base-content/70">
                                                    {genre
                                                        .created_at
                                                        .map(|ts| format_date(&ts))
                                                        .unwrap_or_else(|| "-".into())}
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

            <GenreDialog open=dialog_open editing=editing />
            <ConfirmDialog
                open=confirm_open
                title="Delete Genre"
                message=delete_message
                on_confirm=on_confirm_delete
            />
        </div>
    }
}

/// 新建/编辑类别的小表单
#[component]
fn GenreDialog(open: RwSignal<bool>, editing: RwSignal<Option<Genre>>) -> impl IntoView {
    let ctx = use_hook_ctx();
    let (is_submitting, set_is_submitting) = signal(false);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    let name = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
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

    Effect::new(move |_| {
        if !open.get() {
            return;
        }
        match editing.get_untracked() {
            Some(genre) => {
                name.set(genre.name);
                description.set(genre.description);
            }
            None => {
                name.set(String::new());
                description.set(String::new());
            }
        }
        errors.set(FieldErrors::new());
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let entered_name = name.get();
        let entered_description = description.get();
        if let Err(found) = validate_genre(&entered_name, &entered_description) {
            errors.set(found);
            return;
        }
        errors.set(FieldErrors::new());
        let payload = GenrePayload {
            name: entered_name.trim().to_string(),
            description: entered_description.trim().to_string(),
        };
        let target = editing.get();
        set_is_submitting.set(true);
        spawn_local(async move {
            let ok = match target {
                Some(genre) => hooks::genres::update_genre(ctx, genre.id, payload).await,
                None => hooks::genres::create_genre(ctx, payload).await,
            };
            if ok {
                open.set(false);
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">
                    {move || if editing.get().is_some() { "Edit Genre" } else { "Add Genre" }}
                </h3>

                <form on:submit=on_submit class="space-y-4 mt-4">
                    <div class="form-control">
                        <label class="label">
                            <span class="label-text">"Name"</span>
                        </label>
                        <input
                            type="text"
                            class="input input-bordered w-full"
                            prop:value=name
                            on:input=move |ev| name.set(event_target_value(&ev))
                        />
                        <FieldError errors=errors field="name" />
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
                                    view! { "Create Genre" }.into_any()
                                }
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </dialog>
    }
}
