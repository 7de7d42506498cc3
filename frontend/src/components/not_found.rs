use leptos::prelude::*;

use crate::components::icons::BookOpen;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let router = use_router();

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div>
                    <BookOpen attr:class="h-16 w-16 text-base-content/30 mx-auto" />
                    <h1 class="text-5xl font-bold mt-4">"404"</h1>
                    <p class="py-6 text-base-content/70">
                        "This page seems to be missing from our shelves."
                    </p>
                    <button
                        class="btn btn-primary"
                        on:click=move |_| router.navigate_route(AppRoute::Root)
                    >
                        "Take Me Home"
                    </button>
                </div>
            </div>
        </div>
    }
}
