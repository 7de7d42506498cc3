use leptos::prelude::*;

use crate::components::icons::{Star, StarFilled};

/// Five-star rating row. Filled count is the rounded average.
#[component]
pub fn RatingStars(
    rating: f64,
    #[prop(optional)] count: Option<u32>,
) -> impl IntoView {
    let filled = rating.round().clamp(0.0, 5.0) as u32;
    view! {
        <div class="flex items-center gap-1">
            {(0..5u32)
                .map(|i| {
                    if i < filled {
                        view! { <StarFilled attr:class="h-4 w-4 text-warning" /> }.into_any()
                    } else {
                        view! { <Star attr:class="h-4 w-4 text-base-content/30" /> }.into_any()
                    }
                })
                .collect_view()}
            <span class="text-sm text-base-content/70 ml-1">
                {format!("{rating:.1}")}
                {count.map(|n| format!(" ({n})"))}
            </span>
        </div>
    }
}
