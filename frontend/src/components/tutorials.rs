use leptos::prelude::*;

use crate::components::icons::Video;
use crate::hooks::{self, use_hook_ctx};

#[component]
pub fn TutorialsPage() -> impl IntoView {
    let ctx = use_hook_ctx();
    let tutorials = hooks::tutorials::use_tutorials(ctx);

    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold flex items-center gap-2">
                <Video attr:class="h-6 w-6 text-primary" /> "Tutorials"
            </h1>

            {move || match (tutorials.data.get(), tutorials.error.get()) {
                (_, Some(message)) => view! {
                    <div class="alert alert-error">{message}</div>
                }.into_any(),
                (None, None) => view! {
                    <div class="grid place-items-center py-24">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }.into_any(),
                (Some(rows), None) if rows.is_empty() => view! {
                    <div class="text-center py-24 text-base-content/50">
                        "No tutorials published yet."
                    </div>
                }.into_any(),
                (Some(rows), None) => view! {
                    <div class="grid grid-cols-1 md:grid-cols-2 xl:grid-cols-3 gap-6">
                        {rows
                            .into_iter()
                            .map(|tutorial| {
                                let embed = tutorial.embed_url();
                                view! {
                                    <div class="card bg-base-100 shadow-xl">
                                        <figure class="aspect-video">
                                            <iframe
                                                src=embed
                                                title=tutorial.title.clone()
                                                class="w-full h-full"
                                                allowfullscreen=true
                                            ></iframe>
                                        </figure>
                                        <div class="card-body p-4">
                                            <h3 class="card-title text-base">
                                                {tutorial.title.clone()}
                                            </h3>
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                }.into_any(),
            }}
        </div>
    }
}
