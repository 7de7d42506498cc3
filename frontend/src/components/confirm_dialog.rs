use leptos::prelude::*;

/// Modal confirmation for destructive actions. The parent owns `open`
/// and flips it when a row-level delete button is pressed.
#[component]
pub fn ConfirmDialog(
    open: RwSignal<bool>,
    title: &'static str,
    #[prop(into)] message: Signal<String>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

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

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">{title}</h3>
                <p class="py-4 text-base-content/70">{move || message.get()}</p>
                <div class="modal-action">
                    <button class="btn btn-ghost" on:click=move |_| open.set(false)>
                        "Cancel"
                    </button>
                    <button
                        class="btn btn-error"
                        on:click=move |_| {
                            open.set(false);
                            on_confirm.run(());
                        }
                    >
                        "Delete"
                    </button>
                </div>
            </div>
        </dialog>
    }
}
